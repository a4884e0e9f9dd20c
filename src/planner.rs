//! Planning facade that chains the compute stages into a flight path.

use crate::compute::footprint::{compute_footprint, compute_line_spacing};
use crate::compute::metrics::{
    build_coverage_rect, compute_flight_time, compute_search_area, path_length,
};
use crate::compute::orientation::{normalize_axis_angle, select_orientation};
use crate::compute::path::assemble_path;
use crate::compute::projection::LocalProjection;
use crate::compute::scanline::generate_covered_segments;
use crate::compute::validation::{
    find_self_intersection, normalize_ring, validate_drone_profile, validate_planar_ring,
};
use crate::config::PlannerConfig;
use crate::error::{PlanError, Result};
use aerosweep_types::{DroneProfile, FlightPathResult, Waypoint};
use geo::Coord;
use serde::{Deserialize, Serialize};

/// Relative tolerance for rejecting collinear or zero-area rings.
const DEGENERACY_TOLERANCE: f64 = 1e-12;

/// A flight path together with the intermediate values that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub result: FlightPathResult,
    /// Side of the square camera footprint on the ground, meters
    pub footprint: f64,
    /// Distance between adjacent scan lines, meters
    pub line_spacing: f64,
    /// Sweep direction, degrees counter-clockwise from east
    pub sweep_angle: f64,
    /// `[longitude, latitude]` origin of the planar frame
    pub reference: [f64; 2],
    /// Scan lines that intersect the polygon
    pub scan_line_count: usize,
    /// Covered segments flown, one leg each
    pub segment_count: usize,
    /// Length of the emitted route, meters
    pub path_length: f64,
}

/// Coverage path planner.
///
/// Holds only immutable configuration, so a single planner can be shared
/// across threads and called concurrently.
///
/// # Examples
///
/// ```
/// use aerosweep::{DroneProfile, Planner};
///
/// let planner = Planner::default();
/// let field = [[0.0, 0.0], [0.01, 0.0], [0.01, 0.01], [0.0, 0.01]];
/// let drone = DroneProfile::new("survey", 60.0, 100.0, 50.0, 10.0);
///
/// let result = planner.plan(&field, &drone)?;
/// assert!(result.waypoints.len() >= 2);
/// assert_eq!(result.waypoints.len() % 2, 0);
/// # Ok::<(), aerosweep::PlanError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Start a [`crate::PlannerBuilder`].
    pub fn builder() -> crate::builder::PlannerBuilder {
        crate::builder::PlannerBuilder::new()
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan a boustrophedon flight over the polygon `coords`
    /// (`[longitude, latitude]` pairs, closure optional).
    pub fn plan(&self, coords: &[[f64; 2]], drone: &DroneProfile) -> Result<FlightPathResult> {
        self.plan_report(coords, drone).map(|report| report.result)
    }

    /// Same as [`Planner::plan`] but also returns the intermediate values.
    pub fn plan_report(&self, coords: &[[f64; 2]], drone: &DroneProfile) -> Result<PlanReport> {
        self.config
            .validate()
            .map_err(|e| PlanError::InvalidParameter(format!("Invalid planner config: {}", e)))?;
        validate_drone_profile(drone)?;

        let ring = normalize_ring(coords)?;
        let projection = LocalProjection::centered_on(&ring)?;
        let planar = projection.ring_to_planar(&ring);
        validate_planar_ring(&planar, DEGENERACY_TOLERANCE)?;

        if self.config.reject_self_intersections
            && let Some((a, b)) = find_self_intersection(&planar)
        {
            log::warn!("Rejecting polygon: edges {} and {} intersect", a, b);
            return Err(PlanError::DegeneratePolygon(format!(
                "Polygon boundary intersects itself (edges {} and {})",
                a, b
            )));
        }

        let origin = projection.origin();
        log::debug!(
            "planning {} vertices around ({:.6}, {:.6})",
            planar.len(),
            origin.x,
            origin.y
        );

        let footprint = compute_footprint(drone.field_of_view, drone.altitude)?;
        let spacing = compute_line_spacing(footprint, drone.overlap_fraction)?;
        log::debug!("footprint={:.3} m spacing={:.3} m", footprint, spacing);

        let sweep_angle = match self.config.sweep_angle {
            Some(angle) => normalize_axis_angle(angle),
            None => select_orientation(&planar, self.config.orientation, self.config.tie_tolerance)?,
        };

        let lines =
            generate_covered_segments(&planar, sweep_angle, spacing, self.config.clip_tolerance)?;
        let segment_count: usize = lines.iter().map(|l| l.segments.len()).sum();
        log::debug!(
            "sweep angle {:.3} deg, {} scan lines, {} segments",
            sweep_angle,
            lines.len(),
            segment_count
        );

        let path = assemble_path(&lines)?;
        let route: Vec<Coord> = path.iter().map(|p| p.position).collect();

        let waypoints: Vec<Waypoint> = path
            .iter()
            .map(|p| Waypoint {
                position: projection.to_lon_lat(p.position),
                bearing: p.bearing,
                altitude: drone.altitude,
                coverage_rect: build_coverage_rect(p.position, p.bearing, footprint, &projection),
            })
            .collect();

        let length = path_length(&route);
        let result = FlightPathResult {
            waypoints,
            search_area: compute_search_area(&planar),
            estimated_flight_time: compute_flight_time(&route, drone.speed)?,
        };
        log::debug!(
            "{} waypoints, {:.1} m route, {:.3} km2, {:.2} min",
            result.waypoints.len(),
            length,
            result.search_area,
            result.estimated_flight_time
        );

        Ok(PlanReport {
            result,
            footprint,
            line_spacing: spacing,
            sweep_angle,
            reference: [origin.x, origin.y],
            scan_line_count: lines.len(),
            segment_count,
            path_length: length,
        })
    }
}

/// Plan with the default configuration.
///
/// # Examples
///
/// ```
/// use aerosweep::{DroneProfile, PlanError, generate_flight_path};
///
/// let drone = DroneProfile::new("survey", 60.0, 100.0, 50.0, 10.0);
/// let err = generate_flight_path(&[[0.0, 0.0], [0.01, 0.01]], &drone).unwrap_err();
/// assert!(matches!(err, PlanError::DegeneratePolygon(_)));
/// ```
pub fn generate_flight_path(coords: &[[f64; 2]], drone: &DroneProfile) -> Result<FlightPathResult> {
    Planner::default().plan(coords, drone)
}
