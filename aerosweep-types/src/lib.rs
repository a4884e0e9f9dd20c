//! # aerosweep-types
//!
//! Value types exchanged between the aerosweep survey planner and its callers.
//!
//! - **Drone types**: `DroneProfile`
//! - **Flight types**: `Waypoint`, `CoverageRect`, `FlightPathResult`
//!
//! All types are serializable with Serde. Field names use camelCase on the wire
//! so a map front-end can consume them directly.
//!
//! ## Examples
//!
//! ```rust
//! use aerosweep_types::drone::DroneProfile;
//!
//! let drone = DroneProfile::new("Mavic 3E", 84.0, 100.0, 70.0, 12.0);
//! assert_eq!(drone.model, "Mavic 3E");
//! ```

pub mod drone;
pub mod flight;

pub use drone::DroneProfile;
pub use flight::{CoverageRect, FlightPathResult, Waypoint};
