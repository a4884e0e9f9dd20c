//! Sweep direction selection by rotating calipers.
//!
//! The sweep runs along the longer side of the polygon's optimal enclosing
//! rectangle, which keeps the number of passes (and turns) low.

use crate::config::OrientationStrategy;
use crate::error::{PlanError, Result};
use geo::{Area, ConvexHull, Coord, LineString, Polygon};

/// Enclosing rectangle found for a sweep candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnclosingRect {
    /// Direction of the long side, degrees counter-clockwise from east, [0, 180)
    pub sweep_angle: f64,
    /// Extent along the sweep direction in meters
    pub length: f64,
    /// Extent across the sweep direction in meters
    pub width: f64,
}

impl EnclosingRect {
    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    pub fn perimeter(&self) -> f64 {
        2.0 * (self.length + self.width)
    }

    fn cost(&self, strategy: OrientationStrategy) -> f64 {
        match strategy {
            OrientationStrategy::MinArea => self.area(),
            OrientationStrategy::MinPerimeter => self.perimeter(),
        }
    }
}

/// Optimal enclosing rectangle of a planar ring.
///
/// Every convex hull edge direction is a candidate. Candidates whose cost is
/// within `tie_tolerance` (relative) of each other are resolved in favor of
/// the smallest sweep angle.
pub fn minimum_enclosing_rect(
    ring: &[Coord],
    strategy: OrientationStrategy,
    tie_tolerance: f64,
) -> Result<EnclosingRect> {
    if ring.len() < 3 {
        return Err(PlanError::DegeneratePolygon(format!(
            "Need at least 3 vertices to orient a sweep, got {}",
            ring.len()
        )));
    }

    let hull = Polygon::new(LineString::from(ring.to_vec()), vec![]).convex_hull();
    let hull_area = hull.unsigned_area();
    if !hull_area.is_finite() || hull_area <= 0.0 {
        return Err(PlanError::DegeneratePolygon(
            "Convex hull has zero area".to_string(),
        ));
    }

    let hull_coords = &hull.exterior().0;
    let mut best: Option<(EnclosingRect, f64)> = None;

    for edge in hull_coords.windows(2) {
        let dx = edge[1].x - edge[0].x;
        let dy = edge[1].y - edge[0].y;
        let len = (dx * dx + dy * dy).sqrt();
        if len <= 0.0 {
            continue;
        }

        let axis = Coord {
            x: dx / len,
            y: dy / len,
        };
        let candidate = rect_for_axis(hull_coords, axis, tie_tolerance);
        let cost = candidate.cost(strategy);

        best = match best {
            None => Some((candidate, cost)),
            Some((current, current_cost)) => {
                if nearly_equal(cost, current_cost, tie_tolerance) {
                    if candidate.sweep_angle < current.sweep_angle {
                        Some((candidate, cost))
                    } else {
                        Some((current, current_cost))
                    }
                } else if cost < current_cost {
                    Some((candidate, cost))
                } else {
                    Some((current, current_cost))
                }
            }
        };
    }

    best.map(|(rect, _)| rect).ok_or_else(|| {
        PlanError::DegeneratePolygon("Convex hull has no non-zero edge".to_string())
    })
}

/// Sweep angle in degrees, counter-clockwise from east, in [0, 180).
///
/// # Examples
///
/// ```
/// use aerosweep::compute::orientation::select_orientation;
/// use aerosweep::OrientationStrategy;
/// use geo::coord;
///
/// // 400 m east-west, 100 m north-south
/// let ring = vec![
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 400.0, y: 0.0 },
///     coord! { x: 400.0, y: 100.0 },
///     coord! { x: 0.0, y: 100.0 },
/// ];
/// let angle = select_orientation(&ring, OrientationStrategy::MinArea, 1e-9).unwrap();
/// assert!(angle.abs() < 1e-9);
/// ```
pub fn select_orientation(
    ring: &[Coord],
    strategy: OrientationStrategy,
    tie_tolerance: f64,
) -> Result<f64> {
    let rect = minimum_enclosing_rect(ring, strategy, tie_tolerance)?;
    log::trace!(
        "enclosing rect: angle={:.3} length={:.2} width={:.2}",
        rect.sweep_angle,
        rect.length,
        rect.width
    );
    Ok(rect.sweep_angle)
}

/// Normalize a direction in degrees to [0, 180).
#[inline]
pub fn normalize_axis_angle(degrees: f64) -> f64 {
    let a = degrees.rem_euclid(180.0);
    if a >= 180.0 { 0.0 } else { a }
}

fn rect_for_axis(points: &[Coord], axis: Coord, tie_tolerance: f64) -> EnclosingRect {
    let normal = Coord {
        x: -axis.y,
        y: axis.x,
    };

    let (mut min_a, mut max_a) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_n, mut max_n) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        let a = p.x * axis.x + p.y * axis.y;
        let n = p.x * normal.x + p.y * normal.y;
        min_a = min_a.min(a);
        max_a = max_a.max(a);
        min_n = min_n.min(n);
        max_n = max_n.max(n);
    }

    let along = max_a - min_a;
    let across = max_n - min_n;
    let axis_angle = normalize_axis_angle(axis.y.atan2(axis.x).to_degrees());
    let normal_angle = normalize_axis_angle(normal.y.atan2(normal.x).to_degrees());

    let use_axis = if nearly_equal(along, across, tie_tolerance) {
        axis_angle <= normal_angle
    } else {
        along > across
    };

    if use_axis {
        EnclosingRect {
            sweep_angle: axis_angle,
            length: along,
            width: across,
        }
    } else {
        EnclosingRect {
            sweep_angle: normal_angle,
            length: across,
            width: along,
        }
    }
}

#[inline]
fn nearly_equal(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn rotated(ring: &[Coord], degrees: f64) -> Vec<Coord> {
        let (s, c) = degrees.to_radians().sin_cos();
        ring.iter()
            .map(|p| coord! { x: p.x * c - p.y * s, y: p.x * s + p.y * c })
            .collect()
    }

    fn rectangle(w: f64, h: f64) -> Vec<Coord> {
        vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: w, y: 0.0 },
            coord! { x: w, y: h },
            coord! { x: 0.0, y: h },
        ]
    }

    #[test]
    fn test_axis_aligned_rectangles() {
        let wide = select_orientation(&rectangle(500.0, 100.0), OrientationStrategy::MinArea, 1e-9)
            .unwrap();
        assert!(wide.abs() < 1e-9);

        let tall = select_orientation(&rectangle(100.0, 500.0), OrientationStrategy::MinArea, 1e-9)
            .unwrap();
        assert!((tall - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotated_rectangle() {
        let ring = rotated(&rectangle(600.0, 150.0), 30.0);
        let rect = minimum_enclosing_rect(&ring, OrientationStrategy::MinArea, 1e-9).unwrap();
        assert!((rect.sweep_angle - 30.0).abs() < 1e-6);
        assert!((rect.length - 600.0).abs() < 1e-6);
        assert!((rect.width - 150.0).abs() < 1e-6);

        let ring = rotated(&rectangle(600.0, 150.0), 135.0);
        let angle = select_orientation(&ring, OrientationStrategy::MinPerimeter, 1e-9).unwrap();
        assert!((angle - 135.0).abs() < 1e-6);
    }

    #[test]
    fn test_square_tie_breaks_to_smallest_angle() {
        let ring = rectangle(200.0, 200.0);
        let angle = select_orientation(&ring, OrientationStrategy::MinArea, 1e-9).unwrap();
        assert_eq!(angle, 0.0);
    }

    #[test]
    fn test_concave_uses_hull() {
        // L-shape, long arm along x
        let ring = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1000.0, y: 0.0 },
            coord! { x: 1000.0, y: 100.0 },
            coord! { x: 100.0, y: 100.0 },
            coord! { x: 100.0, y: 300.0 },
            coord! { x: 0.0, y: 300.0 },
        ];
        let angle = select_orientation(&ring, OrientationStrategy::MinArea, 1e-9).unwrap();
        assert!(angle.abs() < 1e-9 || (angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertex_order_does_not_matter() {
        let ring = rotated(&rectangle(300.0, 80.0), 62.0);
        let mut reversed = ring.clone();
        reversed.reverse();
        let mut shifted = ring.clone();
        shifted.rotate_left(2);

        let a = select_orientation(&ring, OrientationStrategy::MinArea, 1e-9).unwrap();
        let b = select_orientation(&reversed, OrientationStrategy::MinArea, 1e-9).unwrap();
        let c = select_orientation(&shifted, OrientationStrategy::MinArea, 1e-9).unwrap();
        assert!((a - b).abs() < 1e-9);
        assert!((a - c).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs() {
        let collinear = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 1.0, y: 1.0 },
            coord! { x: 2.0, y: 2.0 },
        ];
        assert!(matches!(
            select_orientation(&collinear, OrientationStrategy::MinArea, 1e-9),
            Err(PlanError::DegeneratePolygon(_))
        ));

        let two = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }];
        assert!(select_orientation(&two, OrientationStrategy::MinArea, 1e-9).is_err());
    }

    #[test]
    fn test_normalize_axis_angle() {
        assert_eq!(normalize_axis_angle(-90.0), 90.0);
        assert_eq!(normalize_axis_angle(180.0), 0.0);
        assert_eq!(normalize_axis_angle(225.0), 45.0);
        assert_eq!(normalize_axis_angle(-1e-20), 0.0);
    }
}
