//! Boustrophedon path assembly.
//!
//! Turns clipped scan lines into one continuous back-and-forth route. Each
//! covered segment becomes a leg with a waypoint at both ends.

use crate::compute::scanline::ScanLine;
use crate::error::{PlanError, Result};
use geo::Coord;

const DIRECTION_TIE_TOLERANCE: f64 = 1e-9;
const MIN_HOP_METERS: f64 = 1e-9;

/// A waypoint in the planar frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub position: Coord,
    /// Degrees clockwise from north, [0, 360)
    pub bearing: f64,
    /// Index of the scan line this point belongs to
    pub line_index: usize,
}

/// Order scan-line segments into a single zig-zag route.
///
/// Lines are visited in increasing offset order. For each line the route
/// enters at whichever end (low end of the first segment, or high end of the
/// last) is nearer to where the previous leg finished; the first line, and
/// exact ties, follow strict alternation starting forward. All segments of a
/// line are then flown in that direction, so on a concave polygon the hop
/// from one segment to the next crosses the gap outside the polygon.
/// Bearings point to the next waypoint; the last waypoint keeps the heading
/// of the final leg.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::{path::assemble_path, scanline::generate_covered_segments};
/// use geo::coord;
///
/// let square = vec![
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 100.0, y: 0.0 },
///     coord! { x: 100.0, y: 100.0 },
///     coord! { x: 0.0, y: 100.0 },
/// ];
/// let lines = generate_covered_segments(&square, 0.0, 50.0, 1e-6).unwrap();
/// let path = assemble_path(&lines).unwrap();
/// assert_eq!(path.len(), 4);
/// assert_eq!(path[0].bearing, 90.0); // east along the first line
/// ```
pub fn assemble_path(lines: &[ScanLine]) -> Result<Vec<PathPoint>> {
    let mut ordered: Vec<&ScanLine> = lines.iter().filter(|l| !l.segments.is_empty()).collect();
    ordered.sort_by(|a, b| a.offset.total_cmp(&b.offset));

    let segment_count: usize = ordered.iter().map(|l| l.segments.len()).sum();
    if segment_count == 0 {
        return Err(PlanError::EmptyPath(
            "No scan line intersects the polygon".to_string(),
        ));
    }

    let mut route: Vec<(Coord, usize)> = Vec::with_capacity(segment_count * 2);
    let mut current: Option<Coord> = None;

    for (pass, line) in ordered.iter().enumerate() {
        let (Some(first), Some(last)) = (line.segments.first(), line.segments.last()) else {
            continue;
        };

        let forward = match current {
            None => pass % 2 == 0,
            Some(at) => {
                let to_start = distance(at, first.start);
                let to_end = distance(at, last.end);
                if (to_start - to_end).abs() <= DIRECTION_TIE_TOLERANCE * to_start.max(to_end) {
                    pass % 2 == 0
                } else {
                    to_start < to_end
                }
            }
        };

        if forward {
            for seg in &line.segments {
                route.push((seg.start, line.index));
                route.push((seg.end, line.index));
            }
        } else {
            for seg in line.segments.iter().rev() {
                route.push((seg.end, line.index));
                route.push((seg.start, line.index));
            }
        }

        current = route.last().map(|(p, _)| *p);
    }

    let bearings = leg_bearings(&route);
    log::debug!(
        "assembled {} waypoints from {} segments on {} lines",
        route.len(),
        segment_count,
        ordered.len()
    );

    Ok(route
        .into_iter()
        .zip(bearings)
        .map(|((position, line_index), bearing)| PathPoint {
            position,
            bearing,
            line_index,
        })
        .collect())
}

/// Compass bearing in degrees from `from` to `to` in a planar frame with
/// x east and y north, or `None` when the points coincide.
pub fn planar_bearing(from: Coord, to: Coord) -> Option<f64> {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if (dx * dx + dy * dy).sqrt() <= MIN_HOP_METERS {
        return None;
    }
    let deg = dx.atan2(dy).to_degrees().rem_euclid(360.0);
    Some(if deg >= 360.0 { 0.0 } else { deg })
}

fn leg_bearings(route: &[(Coord, usize)]) -> Vec<f64> {
    let raw: Vec<Option<f64>> = route
        .windows(2)
        .map(|w| planar_bearing(w[0].0, w[1].0))
        .collect();

    let mut carried = raw.iter().flatten().copied().next().unwrap_or(0.0);
    let mut bearings = Vec::with_capacity(route.len());
    for b in raw {
        if let Some(b) = b {
            carried = b;
        }
        bearings.push(carried);
    }

    // The final waypoint holds the heading it arrived with.
    bearings.push(carried);
    bearings
}

#[inline]
fn distance(a: Coord, b: Coord) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::scanline::{CoveredSegment, generate_covered_segments};
    use geo::coord;
    use smallvec::smallvec;

    fn square(size: f64) -> Vec<Coord> {
        vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: size, y: 0.0 },
            coord! { x: size, y: size },
            coord! { x: 0.0, y: size },
        ]
    }

    #[test]
    fn test_zigzag_on_square() {
        let lines = generate_covered_segments(&square(100.0), 0.0, 20.0, 1e-6).unwrap();
        let path = assemble_path(&lines).unwrap();
        assert_eq!(path.len(), 10);

        for (i, pair) in path.chunks(2).enumerate() {
            let (a, b) = (pair[0].position, pair[1].position);
            if i % 2 == 0 {
                assert!(a.x < b.x, "pass {} should fly east", i);
            } else {
                assert!(a.x > b.x, "pass {} should fly west", i);
            }
        }

        // Consecutive passes connect at adjacent ends
        for w in path.windows(2).skip(1).step_by(2) {
            assert!((w[0].position.x - w[1].position.x).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bearings() {
        let lines = generate_covered_segments(&square(100.0), 0.0, 50.0, 1e-6).unwrap();
        let path = assemble_path(&lines).unwrap();
        let bearings: Vec<f64> = path.iter().map(|p| p.bearing).collect();
        // east, north (turn), west, west (final repeats last leg)
        assert!((bearings[0] - 90.0).abs() < 1e-9);
        assert!(bearings[1].abs() < 1e-9);
        assert!((bearings[2] - 270.0).abs() < 1e-9);
        assert!((bearings[3] - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_planar_bearing() {
        let o = coord! { x: 0.0, y: 0.0 };
        assert_eq!(planar_bearing(o, coord! { x: 0.0, y: 1.0 }), Some(0.0));
        assert_eq!(planar_bearing(o, coord! { x: 1.0, y: 0.0 }), Some(90.0));
        assert_eq!(planar_bearing(o, coord! { x: 0.0, y: -1.0 }), Some(180.0));
        assert_eq!(planar_bearing(o, coord! { x: -1.0, y: 0.0 }), Some(270.0));
        assert_eq!(planar_bearing(o, o), None);
    }

    #[test]
    fn test_concave_legs_stay_separate() {
        let notched = vec![
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 100.0, y: 0.0 },
            coord! { x: 100.0, y: 100.0 },
            coord! { x: 50.0, y: 50.0 },
            coord! { x: 0.0, y: 100.0 },
        ];
        let lines = generate_covered_segments(&notched, 0.0, 20.0, 1e-6).unwrap();
        let segments: usize = lines.iter().map(|l| l.segments.len()).sum();
        let path = assemble_path(&lines).unwrap();
        assert_eq!(path.len(), segments * 2);
        assert_eq!(path.len() % 2, 0);

        // Within a split line both legs are flown in the same direction
        let split: Vec<&PathPoint> = path.iter().filter(|p| p.line_index == 3).collect();
        assert_eq!(split.len(), 4);
        let dir_a = split[1].position.x - split[0].position.x;
        let dir_b = split[3].position.x - split[2].position.x;
        assert!(dir_a * dir_b > 0.0);
    }

    #[test]
    fn test_nearest_entry_wins_over_parity() {
        // Second line starts right under where the first one ended
        let lines = vec![
            ScanLine {
                index: 0,
                offset: 0.0,
                segments: smallvec![CoveredSegment {
                    start: coord! { x: 0.0, y: 0.0 },
                    end: coord! { x: 100.0, y: 0.0 },
                }],
            },
            ScanLine {
                index: 1,
                offset: 10.0,
                segments: smallvec![CoveredSegment {
                    start: coord! { x: 100.0, y: 10.0 },
                    end: coord! { x: 300.0, y: 10.0 },
                }],
            },
        ];
        let path = assemble_path(&lines).unwrap();
        assert_eq!(path[2].position, coord! { x: 100.0, y: 10.0 });
        assert_eq!(path[3].position, coord! { x: 300.0, y: 10.0 });
    }

    #[test]
    fn test_lines_sorted_by_offset() {
        let mut lines = generate_covered_segments(&square(100.0), 0.0, 25.0, 1e-6).unwrap();
        lines.reverse();
        let path = assemble_path(&lines).unwrap();
        assert!(path[0].position.y < path[path.len() - 1].position.y);
        assert_eq!(path[0].line_index, 0);
    }

    #[test]
    fn test_empty_path() {
        assert!(matches!(assemble_path(&[]), Err(PlanError::EmptyPath(_))));

        let blank = vec![ScanLine {
            index: 0,
            offset: 0.0,
            segments: smallvec![],
        }];
        assert!(matches!(assemble_path(&blank), Err(PlanError::EmptyPath(_))));
    }
}
