//! Validation for planner inputs.
//!
//! Everything here runs before any geometry is computed, so a bad polygon or
//! drone profile fails fast with a typed error.

use crate::error::{PlanError, Result};
use aerosweep_types::DroneProfile;
use geo::{Area, Coord, LineString, Point, Polygon};

/// Validates a 2D point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use aerosweep::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// assert!(validate_geographic_point(&Point::new(172.63, -43.53)).is_ok());
/// assert!(validate_geographic_point(&Point::new(200.0, 40.0)).is_err());
/// assert!(validate_geographic_point(&Point::new(-74.0, 95.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> Result<()> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(PlanError::InvalidInput(format!(
            "Longitude must be finite, got: {}",
            x
        )));
    }

    if !y.is_finite() {
        return Err(PlanError::InvalidInput(format!(
            "Latitude must be finite, got: {}",
            y
        )));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(PlanError::InvalidInput(format!(
            "Longitude out of range [-180.0, 180.0]: {}",
            x
        )));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(PlanError::InvalidInput(format!(
            "Latitude out of range [-90.0, 90.0]: {}",
            y
        )));
    }

    Ok(())
}

/// Validates every value of a drone profile.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::validation::validate_drone_profile;
/// use aerosweep::DroneProfile;
///
/// let ok = DroneProfile::new("M3E", 84.0, 120.0, 70.0, 12.0);
/// assert!(validate_drone_profile(&ok).is_ok());
///
/// let full_overlap = DroneProfile::new("M3E", 84.0, 120.0, 100.0, 12.0);
/// assert!(validate_drone_profile(&full_overlap).is_err());
/// ```
pub fn validate_drone_profile(drone: &DroneProfile) -> Result<()> {
    let fov = drone.field_of_view;
    if !fov.is_finite() || fov <= 0.0 || fov >= 180.0 {
        return Err(PlanError::InvalidParameter(format!(
            "Field of view must be in (0, 180) degrees, got: {}",
            fov
        )));
    }

    if !drone.altitude.is_finite() || drone.altitude <= 0.0 {
        return Err(PlanError::InvalidParameter(format!(
            "Altitude must be positive, got: {}",
            drone.altitude
        )));
    }

    let overlap = drone.overlap_fraction;
    if !overlap.is_finite() || !(0.0..100.0).contains(&overlap) {
        return Err(PlanError::InvalidParameter(format!(
            "Overlap must be in [0, 100) percent, got: {}",
            overlap
        )));
    }

    if !drone.speed.is_finite() || drone.speed <= 0.0 {
        return Err(PlanError::InvalidParameter(format!(
            "Speed must be positive, got: {}",
            drone.speed
        )));
    }

    Ok(())
}

/// Validates polygon coordinates and returns the open ring of distinct
/// vertices.
///
/// A repeated closing vertex and consecutive duplicates are removed. Fewer
/// than 3 remaining vertices is a degenerate polygon.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::validation::normalize_ring;
///
/// let closed = [[0.0, 0.0], [0.01, 0.0], [0.01, 0.01], [0.0, 0.0]];
/// let ring = normalize_ring(&closed).unwrap();
/// assert_eq!(ring.len(), 3);
///
/// assert!(normalize_ring(&[[0.0, 0.0], [1.0, 1.0]]).is_err());
/// ```
pub fn normalize_ring(coords: &[[f64; 2]]) -> Result<Vec<Coord>> {
    let mut ring: Vec<Coord> = Vec::with_capacity(coords.len());

    for (idx, [lon, lat]) in coords.iter().enumerate() {
        let point = Point::new(*lon, *lat);
        validate_geographic_point(&point).map_err(|e| match e {
            PlanError::InvalidInput(msg) => {
                PlanError::InvalidInput(format!("Polygon point at index {}: {}", idx, msg))
            }
            other => other,
        })?;

        let coord = Coord { x: *lon, y: *lat };
        if ring.last() != Some(&coord) {
            ring.push(coord);
        }
    }

    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }

    if ring.len() < 3 {
        log::warn!(
            "Rejecting polygon with {} distinct point(s) out of {} supplied",
            ring.len(),
            coords.len()
        );
        return Err(PlanError::DegeneratePolygon(format!(
            "Polygon needs at least 3 distinct points, got {}",
            ring.len()
        )));
    }

    Ok(ring)
}

/// Rejects planar rings whose vertices are all collinear or that enclose no
/// area. `tolerance` is relative to the ring's extent.
pub fn validate_planar_ring(ring: &[Coord], tolerance: f64) -> Result<()> {
    if ring.len() < 3 {
        return Err(PlanError::DegeneratePolygon(format!(
            "Polygon needs at least 3 vertices, got {}",
            ring.len()
        )));
    }

    if ring.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
        return Err(PlanError::DegeneratePolygon(
            "Polygon has non-finite planar coordinates".to_string(),
        ));
    }

    if is_collinear(ring, tolerance) {
        return Err(PlanError::DegeneratePolygon(
            "All polygon vertices are collinear".to_string(),
        ));
    }

    let extent = diameter(ring);
    let area = Polygon::new(LineString::from(ring.to_vec()), vec![]).unsigned_area();
    if area <= tolerance * extent * extent {
        return Err(PlanError::DegeneratePolygon(format!(
            "Polygon encloses no area ({:.3e} m^2)",
            area
        )));
    }

    Ok(())
}

/// True when every vertex lies within `tolerance * extent` of the line
/// through the first vertex and the vertex farthest from it.
pub fn is_collinear(ring: &[Coord], tolerance: f64) -> bool {
    let Some(&origin) = ring.first() else {
        return true;
    };

    let far = ring.iter().copied().fold(origin, |best, c| {
        if dist2(origin, c) > dist2(origin, best) { c } else { best }
    });

    let len = dist2(origin, far).sqrt();
    if len == 0.0 {
        return true;
    }

    let limit = tolerance.max(f64::EPSILON) * len;
    ring.iter().all(|c| cross(origin, far, *c).abs() / len <= limit)
}

/// First pair of boundary edges that cross each other, as indices of their
/// starting vertices.
///
/// Adjacent edges may share their common vertex but must not fold back over
/// each other.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::validation::find_self_intersection;
/// use geo::coord;
///
/// let bowtie = vec![
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 10.0, y: 10.0 },
///     coord! { x: 10.0, y: 0.0 },
///     coord! { x: 0.0, y: 10.0 },
/// ];
/// assert_eq!(find_self_intersection(&bowtie), Some((0, 2)));
/// ```
pub fn find_self_intersection(ring: &[Coord]) -> Option<(usize, usize)> {
    let n = ring.len();
    if n < 3 {
        return None;
    }

    for i in 0..n {
        let (a1, a2) = (ring[i], ring[(i + 1) % n]);
        for j in (i + 1)..n {
            let (b1, b2) = (ring[j], ring[(j + 1) % n]);
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);

            if adjacent {
                if edges_overlap(a1, a2, b1, b2) {
                    return Some((i, j));
                }
            } else if segments_intersect(a1, a2, b1, b2) {
                return Some((i, j));
            }
        }
    }

    None
}

#[inline]
fn cross(o: Coord, a: Coord, b: Coord) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

#[inline]
fn dist2(a: Coord, b: Coord) -> f64 {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2)
}

fn diameter(ring: &[Coord]) -> f64 {
    let (min, max) = ring.iter().fold(
        (
            Coord {
                x: f64::INFINITY,
                y: f64::INFINITY,
            },
            Coord {
                x: f64::NEG_INFINITY,
                y: f64::NEG_INFINITY,
            },
        ),
        |(lo, hi), c| {
            (
                Coord {
                    x: lo.x.min(c.x),
                    y: lo.y.min(c.y),
                },
                Coord {
                    x: hi.x.max(c.x),
                    y: hi.y.max(c.y),
                },
            )
        },
    );
    dist2(min, max).sqrt()
}

/// `c` lies within the bounding box of segment `a`-`b`.
#[inline]
fn within_box(a: Coord, b: Coord, c: Coord) -> bool {
    c.x >= a.x.min(b.x) && c.x <= a.x.max(b.x) && c.y >= a.y.min(b.y) && c.y <= a.y.max(b.y)
}

fn segments_intersect(p1: Coord, p2: Coord, q1: Coord, q2: Coord) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_box(q1, q2, p1))
        || (d2 == 0.0 && within_box(q1, q2, p2))
        || (d3 == 0.0 && within_box(p1, p2, q1))
        || (d4 == 0.0 && within_box(p1, p2, q2))
}

/// Adjacent edges overlap when they are collinear and the far endpoint of
/// one lies on the other (the boundary doubles back).
fn edges_overlap(a1: Coord, a2: Coord, b1: Coord, b2: Coord) -> bool {
    if cross(a1, a2, b1) != 0.0 || cross(a1, a2, b2) != 0.0 {
        return false;
    }
    let shared = if a2 == b1 || a2 == b2 { a2 } else { a1 };
    let a_far = if a1 == shared { a2 } else { a1 };
    let b_far = if b1 == shared { b2 } else { b1 };

    (a_far != shared && within_box(shared, b_far, a_far) && b_far != shared)
        || (b_far != shared && within_box(shared, a_far, b_far) && a_far != shared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn test_valid_geographic_point() {
        assert!(validate_geographic_point(&Point::new(-74.0060, 40.7128)).is_ok());
        assert!(validate_geographic_point(&Point::new(180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(-180.0, 0.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, 90.0)).is_ok());
        assert!(validate_geographic_point(&Point::new(0.0, -90.0)).is_ok());
    }

    #[test]
    fn test_invalid_geographic_point() {
        assert!(validate_geographic_point(&Point::new(180.1, 40.0)).is_err());
        assert!(validate_geographic_point(&Point::new(-74.0, -90.1)).is_err());
        assert!(validate_geographic_point(&Point::new(f64::NAN, 40.0)).is_err());
        assert!(matches!(
            validate_geographic_point(&Point::new(-74.0, f64::INFINITY)),
            Err(PlanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_drone_profile_ranges() {
        let base = DroneProfile::new("test", 60.0, 100.0, 50.0, 10.0);
        assert!(validate_drone_profile(&base).is_ok());
        assert!(validate_drone_profile(&base.clone().with_overlap(0.0)).is_ok());

        let cases = [
            DroneProfile::new("fov0", 0.0, 100.0, 50.0, 10.0),
            DroneProfile::new("fov180", 180.0, 100.0, 50.0, 10.0),
            DroneProfile::new("alt0", 60.0, 0.0, 50.0, 10.0),
            DroneProfile::new("altneg", 60.0, -1.0, 50.0, 10.0),
            DroneProfile::new("ov100", 60.0, 100.0, 100.0, 10.0),
            DroneProfile::new("ovneg", 60.0, 100.0, -5.0, 10.0),
            DroneProfile::new("speed0", 60.0, 100.0, 50.0, 0.0),
            DroneProfile::new("speednan", 60.0, 100.0, 50.0, f64::NAN),
        ];
        for drone in cases {
            assert!(
                matches!(
                    validate_drone_profile(&drone),
                    Err(PlanError::InvalidParameter(_))
                ),
                "{} should be rejected",
                drone.model
            );
        }
    }

    #[test]
    fn test_normalize_ring() {
        let ring = normalize_ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 0.0], [1.0, 1.0]]).unwrap();
        assert_eq!(ring.len(), 3);

        let closed =
            normalize_ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]).unwrap();
        assert_eq!(closed.len(), 4);
    }

    #[test]
    fn test_normalize_ring_degenerate() {
        assert!(matches!(
            normalize_ring(&[[0.0, 0.0], [1.0, 1.0]]),
            Err(PlanError::DegeneratePolygon(_))
        ));
        assert!(normalize_ring(&[[0.0, 0.0], [0.0, 0.0], [0.0, 0.0]]).is_err());
        assert!(normalize_ring(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]).is_err());
        assert!(normalize_ring(&[]).is_err());
    }

    #[test]
    fn test_normalize_ring_bad_coordinate() {
        let err = normalize_ring(&[[0.0, 0.0], [999.0, 0.0], [1.0, 1.0]]).unwrap_err();
        match err {
            PlanError::InvalidInput(msg) => assert!(msg.contains("index 1")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_planar_ring_collinear() {
        let line = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 50.0, y: 50.0 },
            coord! { x: 100.0, y: 100.0 },
            coord! { x: 25.0, y: 25.0 },
        ];
        assert!(is_collinear(&line, 1e-9));
        assert!(matches!(
            validate_planar_ring(&line, 1e-9),
            Err(PlanError::DegeneratePolygon(_))
        ));
    }

    #[test]
    fn test_planar_ring_valid() {
        let tri = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 100.0, y: 0.0 },
            coord! { x: 0.0, y: 50.0 },
        ];
        assert!(!is_collinear(&tri, 1e-9));
        assert!(validate_planar_ring(&tri, 1e-9).is_ok());
    }

    #[test]
    fn test_self_intersection() {
        let square = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 10.0, y: 10.0 },
            coord! { x: 0.0, y: 10.0 },
        ];
        assert_eq!(find_self_intersection(&square), None);

        let bowtie = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 10.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 0.0, y: 10.0 },
        ];
        assert_eq!(find_self_intersection(&bowtie), Some((0, 2)));

        // Spike that doubles back along its own edge
        let spike = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 10.0, y: 0.0 },
            coord! { x: 5.0, y: 0.0 },
            coord! { x: 5.0, y: 10.0 },
        ];
        assert!(find_self_intersection(&spike).is_some());
    }

    #[test]
    fn test_concave_is_simple() {
        let notched = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 100.0, y: 0.0 },
            coord! { x: 100.0, y: 100.0 },
            coord! { x: 50.0, y: 50.0 },
            coord! { x: 0.0, y: 100.0 },
        ];
        assert_eq!(find_self_intersection(&notched), None);
    }
}
