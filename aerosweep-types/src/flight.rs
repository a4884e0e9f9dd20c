use geo::{Coord, LineString, Point, Polygon};
use serde::{Deserialize, Serialize};

/// Ground footprint of the camera at a waypoint.
///
/// `coords` is a closed ring of `[longitude, latitude]` pairs: four corners
/// followed by the first corner repeated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageRect {
    pub coords: [[f64; 2]; 5],
    pub center: [f64; 2],
}

impl CoverageRect {
    /// Footprint as a `geo::Polygon` in geographic coordinates.
    pub fn to_polygon(&self) -> Polygon {
        let ring: Vec<Coord> = self
            .coords
            .iter()
            .map(|[x, y]| Coord { x: *x, y: *y })
            .collect();
        Polygon::new(LineString::from(ring), vec![])
    }

    pub fn center_point(&self) -> Point {
        Point::new(self.center[0], self.center[1])
    }
}

/// A single stop on the flight path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    /// `[longitude, latitude]` in degrees
    pub position: [f64; 2],
    /// Heading in degrees clockwise from north, [0, 360)
    pub bearing: f64,
    /// Altitude above ground in meters
    pub altitude: f64,
    pub coverage_rect: CoverageRect,
}

impl Waypoint {
    pub fn longitude(&self) -> f64 {
        self.position[0]
    }

    pub fn latitude(&self) -> f64 {
        self.position[1]
    }

    pub fn point(&self) -> Point {
        Point::new(self.position[0], self.position[1])
    }
}

/// Output of one planning call.
///
/// Waypoints are in flight order. `search_area` is the area of the input
/// polygon in square kilometers and `estimated_flight_time` the duration of
/// the emitted path in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightPathResult {
    pub waypoints: Vec<Waypoint>,
    pub search_area: f64,
    pub estimated_flight_time: f64,
}

impl FlightPathResult {
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// The route as a `geo::LineString` of waypoint positions.
    pub fn route(&self) -> LineString {
        self.waypoints
            .iter()
            .map(|wp| Coord {
                x: wp.position[0],
                y: wp.position[1],
            })
            .collect()
    }
}
