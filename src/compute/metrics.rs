//! Coverage footprints and plan metrics.

use crate::compute::projection::LocalProjection;
use crate::error::{PlanError, Result};
use aerosweep_types::CoverageRect;
use geo::{Area, Coord, Distance, Euclidean, LineString, Point, Polygon};

const SQUARE_METERS_PER_SQUARE_KILOMETER: f64 = 1_000_000.0;

/// Camera footprint centered on a planar waypoint and rotated to its
/// heading, returned in geographic coordinates.
///
/// Corner order is front-left, rear-left, rear-right, front-right relative to
/// the direction of travel, closed by repeating front-left.
pub fn build_coverage_rect(
    position: Coord,
    bearing_degrees: f64,
    footprint: f64,
    projection: &LocalProjection,
) -> CoverageRect {
    let hw = footprint / 2.0;
    let (sin, cos) = bearing_degrees.to_radians().sin_cos();
    let forward = Coord { x: sin, y: cos };
    let right = Coord { x: cos, y: -sin };

    let corner = |f: f64, r: f64| Coord {
        x: position.x + hw * (f * forward.x + r * right.x),
        y: position.y + hw * (f * forward.y + r * right.y),
    };

    let front_left = projection.to_lon_lat(corner(1.0, -1.0));
    let rear_left = projection.to_lon_lat(corner(-1.0, -1.0));
    let rear_right = projection.to_lon_lat(corner(-1.0, 1.0));
    let front_right = projection.to_lon_lat(corner(1.0, 1.0));

    CoverageRect {
        coords: [front_left, rear_left, rear_right, front_right, front_left],
        center: projection.to_lon_lat(position),
    }
}

/// Area of a planar ring in square kilometers (shoelace formula).
///
/// Independent of vertex order and winding.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::metrics::compute_search_area;
/// use geo::coord;
///
/// let ring = vec![
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 2000.0, y: 0.0 },
///     coord! { x: 2000.0, y: 500.0 },
///     coord! { x: 0.0, y: 500.0 },
/// ];
/// assert_eq!(compute_search_area(&ring), 1.0);
/// ```
pub fn compute_search_area(ring: &[Coord]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    Polygon::new(LineString::from(ring.to_vec()), vec![]).unsigned_area()
        / SQUARE_METERS_PER_SQUARE_KILOMETER
}

/// Total Euclidean length in meters of a planar route.
pub fn path_length(points: &[Coord]) -> f64 {
    points
        .windows(2)
        .map(|w| Euclidean.distance(Point::from(w[0]), Point::from(w[1])))
        .sum()
}

/// Minutes needed to fly `points` in order at `speed` meters per second.
///
/// Routes with fewer than two points take no time.
pub fn compute_flight_time(points: &[Coord], speed: f64) -> Result<f64> {
    if !speed.is_finite() || speed <= 0.0 {
        return Err(PlanError::InvalidParameter(format!(
            "Speed must be a positive number of meters per second, got: {}",
            speed
        )));
    }

    Ok(path_length(points) / speed / 60.0)
}
