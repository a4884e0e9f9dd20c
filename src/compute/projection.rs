//! Local planar projection for survey-scale areas.
//!
//! Equirectangular approximation around a reference point: one degree of
//! latitude is a constant distance and one degree of longitude is scaled by
//! the cosine of the reference latitude. Accurate to well under a meter for
//! areas spanning tens of kilometers; accuracy degrades toward the poles and
//! over large latitude ranges.

use crate::error::{PlanError, Result};
use geo::Coord;
use std::f64::consts::PI;

/// Mean Earth radius (IUGG) in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// Meters per degree of latitude on the mean sphere.
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_METERS * PI / 180.0;

/// Largest absolute reference latitude the projection accepts.
pub const MAX_REFERENCE_LATITUDE: f64 = 89.0;

/// Projection between `[longitude, latitude]` degrees and a local metric
/// frame (x east, y north, meters) centered on `origin`.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::projection::LocalProjection;
/// use geo::coord;
///
/// let proj = LocalProjection::new(coord! { x: 172.6, y: -43.5 }).unwrap();
/// let planar = proj.to_planar(coord! { x: 172.6, y: -43.49 });
/// assert!((planar.y - 1111.95).abs() < 0.1);
///
/// let back = proj.to_geographic(planar);
/// assert!((back.y + 43.49).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalProjection {
    origin: Coord,
    lon_scale: f64,
}

impl LocalProjection {
    /// Projection whose planar origin sits at `origin` (longitude, latitude).
    pub fn new(origin: Coord) -> Result<Self> {
        if !origin.x.is_finite() || !origin.y.is_finite() {
            return Err(PlanError::InvalidParameter(format!(
                "Projection origin must be finite, got: ({}, {})",
                origin.x, origin.y
            )));
        }

        if origin.y.abs() > MAX_REFERENCE_LATITUDE {
            return Err(PlanError::InvalidParameter(format!(
                "Reference latitude {} is beyond +/-{} degrees",
                origin.y, MAX_REFERENCE_LATITUDE
            )));
        }

        Ok(Self {
            origin: Coord {
                x: wrap_longitude(origin.x),
                y: origin.y,
            },
            lon_scale: METERS_PER_DEGREE * origin.y.to_radians().cos(),
        })
    }

    /// Projection centered on the geographic bounding box of `coords`.
    ///
    /// Longitudes are unwrapped relative to the first coordinate, so a ring
    /// crossing the antimeridian gets a center on the correct side.
    pub fn centered_on(coords: &[Coord]) -> Result<Self> {
        let Some(first) = coords.first() else {
            return Err(PlanError::DegeneratePolygon(
                "Cannot center a projection on an empty ring".to_string(),
            ));
        };

        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for coord in coords {
            let dx = wrap_longitude(coord.x - first.x);
            min_x = min_x.min(dx);
            max_x = max_x.max(dx);
            min_y = min_y.min(coord.y);
            max_y = max_y.max(coord.y);
        }

        Self::new(Coord {
            x: first.x + (min_x + max_x) / 2.0,
            y: (min_y + max_y) / 2.0,
        })
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn reference_latitude(&self) -> f64 {
        self.origin.y
    }

    /// Geographic (degrees) to planar (meters).
    #[inline]
    pub fn to_planar(&self, geo: Coord) -> Coord {
        Coord {
            x: wrap_longitude(geo.x - self.origin.x) * self.lon_scale,
            y: (geo.y - self.origin.y) * METERS_PER_DEGREE,
        }
    }

    /// Planar (meters) to geographic (degrees), longitude in [-180, 180).
    #[inline]
    pub fn to_geographic(&self, planar: Coord) -> Coord {
        Coord {
            x: wrap_longitude(self.origin.x + planar.x / self.lon_scale),
            y: self.origin.y + planar.y / METERS_PER_DEGREE,
        }
    }

    pub fn ring_to_planar(&self, ring: &[Coord]) -> Vec<Coord> {
        ring.iter().map(|c| self.to_planar(*c)).collect()
    }

    /// Planar point as a `[longitude, latitude]` pair.
    pub fn to_lon_lat(&self, planar: Coord) -> [f64; 2] {
        let geo = self.to_geographic(planar);
        [geo.x, geo.y]
    }
}

/// Project a point with the origin at the prime meridian and the given
/// reference latitude.
pub fn to_planar(point: Coord, reference_latitude: f64) -> Result<Coord> {
    let proj = LocalProjection::new(Coord {
        x: 0.0,
        y: reference_latitude,
    })?;
    // Keep latitude absolute so the reference only affects longitude scale.
    let planar = proj.to_planar(point);
    Ok(Coord {
        x: planar.x,
        y: point.y * METERS_PER_DEGREE,
    })
}

/// Inverse of [`to_planar`].
pub fn to_geographic(point: Coord, reference_latitude: f64) -> Result<Coord> {
    let proj = LocalProjection::new(Coord {
        x: 0.0,
        y: reference_latitude,
    })?;
    let geo = proj.to_geographic(point);
    Ok(Coord {
        x: geo.x,
        y: point.y / METERS_PER_DEGREE,
    })
}

/// Normalize a longitude into [-180, 180).
#[inline]
pub fn wrap_longitude(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn planar_distance(a: Coord, b: Coord) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    /// Distance in meters between two geographic points, measured in the
    /// frame of `proj`.
    fn ground_error(proj: &LocalProjection, a: Coord, b: Coord) -> f64 {
        planar_distance(proj.to_planar(a), proj.to_planar(b))
    }

    #[test]
    fn test_origin_maps_to_zero() {
        let proj = LocalProjection::new(coord! { x: -74.0060, y: 40.7128 }).unwrap();
        let p = proj.to_planar(coord! { x: -74.0060, y: 40.7128 });
        assert_eq!(p, coord! { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_scales() {
        let proj = LocalProjection::new(coord! { x: 0.0, y: 60.0 }).unwrap();

        let north = proj.to_planar(coord! { x: 0.0, y: 60.01 });
        assert!((north.y - 0.01 * METERS_PER_DEGREE).abs() < 1e-6);

        // cos(60) = 0.5
        let east = proj.to_planar(coord! { x: 0.01, y: 60.0 });
        assert!((east.x - 0.005 * METERS_PER_DEGREE).abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_within_100km() {
        let origins = [
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 172.63, y: -43.53 },
            coord! { x: -122.42, y: 37.77 },
            coord! { x: 18.07, y: 59.33 },
        ];

        for origin in origins {
            let proj = LocalProjection::new(origin).unwrap();
            for (dx, dy) in [(0.9, 0.0), (-0.9, 0.5), (0.3, -0.9), (-0.6, -0.6)] {
                let p = coord! { x: origin.x + dx, y: origin.y + dy };
                let back = proj.to_geographic(proj.to_planar(p));
                assert!(
                    ground_error(&proj, p, back) < 1.0,
                    "round trip drifted at {:?}",
                    p
                );
            }
        }
    }

    #[test]
    fn test_free_functions_round_trip() {
        let p = coord! { x: 174.7633, y: -36.8485 };
        let planar = to_planar(p, -36.85).unwrap();
        let back = to_geographic(planar, -36.85).unwrap();
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_polar_reference() {
        assert!(LocalProjection::new(coord! { x: 0.0, y: 89.5 }).is_err());
        assert!(to_planar(coord! { x: 0.0, y: 0.0 }, -90.0).is_err());
        assert!(LocalProjection::new(coord! { x: f64::NAN, y: 0.0 }).is_err());
    }

    #[test]
    fn test_centered_on_bounding_box() {
        let ring = vec![
            coord! { x: 10.0, y: 50.0 },
            coord! { x: 10.2, y: 50.0 },
            coord! { x: 10.2, y: 50.1 },
        ];
        let proj = LocalProjection::centered_on(&ring).unwrap();
        assert!((proj.origin().x - 10.1).abs() < 1e-12);
        assert!((proj.reference_latitude() - 50.05).abs() < 1e-12);
    }

    #[test]
    fn test_centered_on_antimeridian() {
        let ring = vec![
            coord! { x: 179.99, y: -17.0 },
            coord! { x: -179.99, y: -17.0 },
            coord! { x: -179.99, y: -16.98 },
            coord! { x: 179.99, y: -16.98 },
        ];
        let proj = LocalProjection::centered_on(&ring).unwrap();
        assert!(proj.origin().x.abs() > 179.9);

        let west = proj.to_planar(ring[0]);
        let east = proj.to_planar(ring[1]);
        // 0.02 degrees of longitude, not 359.98
        assert!((east.x - west.x) > 0.0);
        assert!((east.x - west.x) < 3_000.0);
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(45.0), 45.0);
        assert_eq!(wrap_longitude(180.0), -180.0);
    }
}
