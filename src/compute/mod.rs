//! Geometry stages of the planner.
//!
//! Each stage is a pure function over planar or geographic coordinates:
//! - Projection between degrees and a local metric frame
//! - Camera footprint and line spacing
//! - Sweep orientation selection
//! - Scan-line clipping and path assembly
//! - Coverage rectangles, area and flight time
//! - GeoJSON and WPML export behind their features
//!
//! The [`crate::planner`] module chains them together.

pub mod footprint;
#[cfg(feature = "geojson")]
pub mod geojson;
pub mod metrics;
pub mod orientation;
pub mod path;
pub mod projection;
pub mod scanline;
pub mod validation;
#[cfg(feature = "wpml")]
pub mod wpml;
