//! GeoJSON conversion for survey polygons and flight paths.

use crate::error::{PlanError, Result};
use aerosweep_types::FlightPathResult;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde_json::{Map, json};

/// Parses a survey polygon out of GeoJSON.
///
/// Accepts a Polygon geometry, a Feature wrapping one, or a FeatureCollection
/// holding exactly one such Feature. Only the exterior ring is returned;
/// holes are ignored.
///
/// # Examples
///
/// ```
/// use aerosweep::compute::geojson::polygon_from_geojson;
///
/// let gj = r#"{"type":"Polygon","coordinates":[[[0,0],[0.01,0],[0.01,0.01],[0,0]]]}"#;
/// let coords = polygon_from_geojson(gj).unwrap();
/// assert_eq!(coords.len(), 4);
/// assert_eq!(coords[1], [0.01, 0.0]);
/// ```
pub fn polygon_from_geojson(geojson: &str) -> Result<Vec<[f64; 2]>> {
    let parsed: GeoJson = geojson
        .parse()
        .map_err(|e| PlanError::InvalidInput(format!("Failed to parse GeoJSON: {}", e)))?;

    let geometry = match parsed {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feature) => feature_geometry(feature)?,
        GeoJson::FeatureCollection(collection) => {
            if collection.features.len() != 1 {
                return Err(PlanError::InvalidInput(format!(
                    "FeatureCollection must hold exactly one feature, got {}",
                    collection.features.len()
                )));
            }
            let Some(feature) = collection.features.into_iter().next() else {
                return Err(PlanError::InvalidInput(
                    "FeatureCollection is empty".to_string(),
                ));
            };
            feature_geometry(feature)?
        }
    };

    match geometry.value {
        Value::Polygon(rings) => {
            let Some(exterior) = rings.first() else {
                return Err(PlanError::InvalidInput(
                    "Polygon must have at least one ring".to_string(),
                ));
            };

            exterior
                .iter()
                .map(|coords| {
                    if coords.len() < 2 {
                        return Err(PlanError::InvalidInput(
                            "Coordinate must have at least 2 values".to_string(),
                        ));
                    }
                    Ok([coords[0], coords[1]])
                })
                .collect()
        }
        _ => Err(PlanError::InvalidInput(
            "GeoJSON geometry is not a Polygon".to_string(),
        )),
    }
}

fn feature_geometry(feature: Feature) -> Result<Geometry> {
    feature
        .geometry
        .ok_or_else(|| PlanError::InvalidInput("GeoJSON feature has no geometry".to_string()))
}

/// Converts a flight path to a GeoJSON FeatureCollection.
///
/// The first feature is the route as a LineString carrying `searchArea` and
/// `estimatedFlightTime`. It is followed by one Point feature per waypoint
/// (`index`, `bearing`, `altitude`) and then one Polygon feature per camera
/// footprint (`index`).
pub fn flight_path_to_geojson(result: &FlightPathResult) -> Result<String> {
    let mut features = Vec::with_capacity(1 + result.waypoints.len() * 2);

    let route: Vec<Vec<f64>> = result
        .waypoints
        .iter()
        .map(|wp| wp.position.to_vec())
        .collect();
    features.push(feature(
        Value::LineString(route),
        [
            ("kind", json!("route")),
            ("searchArea", json!(result.search_area)),
            ("estimatedFlightTime", json!(result.estimated_flight_time)),
        ],
    ));

    for (index, wp) in result.waypoints.iter().enumerate() {
        features.push(feature(
            Value::Point(wp.position.to_vec()),
            [
                ("kind", json!("waypoint")),
                ("index", json!(index)),
                ("bearing", json!(wp.bearing)),
                ("altitude", json!(wp.altitude)),
            ],
        ));
    }

    for (index, wp) in result.waypoints.iter().enumerate() {
        let ring: Vec<Vec<f64>> = wp.coverage_rect.coords.iter().map(|c| c.to_vec()).collect();
        features.push(feature(
            Value::Polygon(vec![ring]),
            [("kind", json!("coverage")), ("index", json!(index))],
        ));
    }

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };

    serde_json::to_string(&collection).map_err(|e| {
        PlanError::Serialization(format!("Failed to serialize flight path: {}", e))
    })
}

fn feature<const N: usize>(value: Value, properties: [(&str, serde_json::Value); N]) -> Feature {
    let props: Map<String, serde_json::Value> = properties
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}
