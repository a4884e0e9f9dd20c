//! Scan-line generation and polygon clipping.
//!
//! Lines are laid out in a frame rotated so the sweep direction is the +x
//! axis, clipped against the polygon boundary with an even-odd crossing test,
//! and rotated back into the planar frame.

use crate::error::{PlanError, Result};
use geo::{Area, Coord, LineString, Polygon};
use smallvec::SmallVec;

/// Upper bound on the number of scan lines a single plan may lay out.
pub const MAX_SCAN_LINES: usize = 1_000_000;

/// Part of a scan line lying inside the polygon.
///
/// `start` is the end with the lower coordinate along the sweep direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoveredSegment {
    pub start: Coord,
    pub end: Coord,
}

impl CoveredSegment {
    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One scan line with its covered segments, ordered along the sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanLine {
    /// Position of the line in the full layout, counting dropped lines
    pub index: usize,
    /// Perpendicular offset of the line in the rotated frame, meters
    pub offset: f64,
    pub segments: SmallVec<[CoveredSegment; 2]>,
}

/// Rotation between the planar frame and the sweep frame.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SweepFrame {
    sin: f64,
    cos: f64,
}

impl SweepFrame {
    pub(crate) fn new(orientation_degrees: f64) -> Self {
        let (sin, cos) = orientation_degrees.to_radians().sin_cos();
        Self { sin, cos }
    }

    /// Planar to sweep frame (rotate by -orientation).
    #[inline]
    pub(crate) fn to_sweep(&self, p: Coord) -> Coord {
        Coord {
            x: p.x * self.cos + p.y * self.sin,
            y: -p.x * self.sin + p.y * self.cos,
        }
    }

    /// Sweep frame to planar (rotate by +orientation).
    #[inline]
    pub(crate) fn to_planar(&self, p: Coord) -> Coord {
        Coord {
            x: p.x * self.cos - p.y * self.sin,
            y: p.x * self.sin + p.y * self.cos,
        }
    }
}

/// Lay out parallel scan lines `spacing` meters apart at `orientation_degrees`
/// and clip them to `ring`.
///
/// The first line sits `spacing / 2` inside the polygon's extent so each pass
/// is centered on its strip. Lines that miss the polygon are dropped; a line
/// crossing a concavity yields several disjoint segments.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::scanline::generate_covered_segments;
/// use geo::coord;
///
/// let square = vec![
///     coord! { x: 0.0, y: 0.0 },
///     coord! { x: 100.0, y: 0.0 },
///     coord! { x: 100.0, y: 100.0 },
///     coord! { x: 0.0, y: 100.0 },
/// ];
/// let lines = generate_covered_segments(&square, 0.0, 20.0, 1e-6).unwrap();
/// assert_eq!(lines.len(), 5);
/// assert_eq!(lines[0].offset, 10.0);
/// ```
pub fn generate_covered_segments(
    ring: &[Coord],
    orientation_degrees: f64,
    spacing: f64,
    tolerance: f64,
) -> Result<Vec<ScanLine>> {
    if ring.len() < 3 {
        return Err(PlanError::DegeneratePolygon(format!(
            "Need at least 3 vertices to clip scan lines, got {}",
            ring.len()
        )));
    }

    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(PlanError::InvalidParameter(format!(
            "Line spacing must be positive, got: {}",
            spacing
        )));
    }

    if !orientation_degrees.is_finite() {
        return Err(PlanError::InvalidParameter(format!(
            "Sweep orientation must be finite, got: {}",
            orientation_degrees
        )));
    }

    let area = Polygon::new(LineString::from(ring.to_vec()), vec![]).unsigned_area();
    if !area.is_finite() || area <= 0.0 {
        return Err(PlanError::DegeneratePolygon(
            "Polygon has zero area".to_string(),
        ));
    }

    let frame = SweepFrame::new(orientation_degrees);
    let rotated: Vec<Coord> = ring.iter().map(|p| frame.to_sweep(*p)).collect();

    let (min_y, max_y) = rotated
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    let extent = max_y - min_y;

    let wanted = (extent / spacing).ceil();
    if wanted > MAX_SCAN_LINES as f64 {
        return Err(PlanError::InvalidParameter(format!(
            "Scan line limit exceeded: spacing of {} m needs {} lines over a {:.1} m extent, planner limit is {}",
            spacing, wanted, extent, MAX_SCAN_LINES
        )));
    }
    let count = (wanted as usize).max(1);

    let mut lines = Vec::with_capacity(count);
    let mut crossings: Vec<f64> = Vec::new();

    for index in 0..count {
        let offset = min_y + spacing / 2.0 + index as f64 * spacing;

        crossings.clear();
        collect_crossings(&rotated, offset, &mut crossings);
        let intervals = pair_intervals(&crossings, tolerance);

        if intervals.is_empty() {
            log::trace!("scan line {} at offset {:.3} misses polygon", index, offset);
            continue;
        }

        let segments: SmallVec<[CoveredSegment; 2]> = intervals
            .iter()
            .map(|&(x0, x1)| CoveredSegment {
                start: frame.to_planar(Coord { x: x0, y: offset }),
                end: frame.to_planar(Coord { x: x1, y: offset }),
            })
            .collect();

        log::trace!(
            "scan line {} at offset {:.3}: {} segment(s)",
            index,
            offset,
            segments.len()
        );

        lines.push(ScanLine {
            index,
            offset,
            segments,
        });
    }

    Ok(lines)
}

/// x coordinates where the horizontal line `y` crosses the ring's edges,
/// sorted ascending.
///
/// Half-open rule: an edge counts when one endpoint is at or below `y` and
/// the other strictly above, so shared vertices are counted once and
/// horizontal edges never.
fn collect_crossings(ring: &[Coord], y: f64, out: &mut Vec<f64>) {
    let n = ring.len();
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if (a.y <= y && b.y > y) || (b.y <= y && a.y > y) {
            let t = (y - a.y) / (b.y - a.y);
            out.push(a.x + t * (b.x - a.x));
        }
    }
    out.sort_by(f64::total_cmp);
}

/// Pair sorted crossings into inside intervals, merging intervals that touch
/// and dropping those not longer than `tolerance`.
fn pair_intervals(crossings: &[f64], tolerance: f64) -> SmallVec<[(f64, f64); 2]> {
    let mut merged: SmallVec<[(f64, f64); 2]> = SmallVec::new();

    for pair in crossings.chunks_exact(2) {
        let (x0, x1) = (pair[0], pair[1]);
        match merged.last_mut() {
            Some(last) if x0 - last.1 <= tolerance => last.1 = last.1.max(x1),
            _ => merged.push((x0, x1)),
        }
    }

    merged.retain(|(x0, x1)| *x1 - *x0 > tolerance);
    merged
}
