//! Coverage path planning for aerial surveys: camera footprint, sweep
//! orientation, clipped scan lines and a boustrophedon flight path.
//!
//! ```rust
//! use aerosweep::{DroneProfile, generate_flight_path};
//!
//! let field = [[172.60, -43.53], [172.61, -43.53], [172.61, -43.52], [172.60, -43.52]];
//! let drone = DroneProfile::new("M3E", 84.0, 120.0, 70.0, 12.0);
//!
//! let plan = generate_flight_path(&field, &drone)?;
//! assert_eq!(plan.waypoints.len() % 2, 0);
//! assert!(plan.search_area > 0.0);
//! # Ok::<(), aerosweep::PlanError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod planner;

pub use builder::PlannerBuilder;
pub use config::{OrientationStrategy, PlannerConfig};
pub use error::{PlanError, Result};
pub use planner::{PlanReport, Planner, generate_flight_path};

pub use aerosweep_types::{CoverageRect, DroneProfile, FlightPathResult, Waypoint};

#[cfg(feature = "geojson")]
pub use compute::geojson::{flight_path_to_geojson, polygon_from_geojson};
#[cfg(feature = "wpml")]
pub use compute::wpml::flight_path_to_wpml;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{
        DroneProfile, FlightPathResult, PlanError, PlanReport, Planner, PlannerBuilder,
        PlannerConfig, Result, Waypoint, generate_flight_path,
    };
}
