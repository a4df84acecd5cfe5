//! Decoding of location API payloads

use geo::{Geometry, Point};
use geojson::{FeatureCollection, GeoJson};

use crate::{BoundaryRegion, GeoError};

/// A decoded location API payload
#[derive(Debug, Clone)]
pub enum Payload {
    /// The API reported an error condition; the raw detail is kept for logs
    Error(serde_json::Value),
    /// A usable position with its candidate boundary regions
    Tracked(TrackedLocation),
}

/// The subject's current point plus the boundaries to check it against
#[derive(Debug, Clone)]
pub struct TrackedLocation {
    pub position: Point<f64>,
    pub boundaries: Vec<BoundaryRegion>,
}

/// Decode one API response body.
///
/// A payload with an `"error"` key is the API's error shape. Anything else
/// must be a feature collection whose first feature is a point (the tracked
/// position) and whose remaining features are polygonal boundaries.
pub fn decode_payload(value: serde_json::Value) -> Result<Payload, GeoError> {
    if let Some(detail) = value.get("error") {
        return Ok(Payload::Error(detail.clone()));
    }

    let geojson = GeoJson::from_json_value(value)?;
    let collection = FeatureCollection::try_from(geojson)?;

    let mut features = collection.features.into_iter().enumerate();

    let (_, first) = features.next().ok_or(GeoError::EmptyFeatureCollection)?;
    let geometry = first.geometry.ok_or(GeoError::MissingGeometry { index: 0 })?;
    let position = match Geometry::<f64>::try_from(geometry.value)? {
        Geometry::Point(point) => point,
        _ => return Err(GeoError::PositionNotAPoint),
    };

    let mut boundaries = Vec::new();
    for (index, feature) in features {
        let geometry = feature
            .geometry
            .ok_or(GeoError::MissingGeometry { index })?;
        let region = match Geometry::<f64>::try_from(geometry.value)? {
            Geometry::Polygon(polygon) => BoundaryRegion::Polygon(polygon),
            Geometry::MultiPolygon(multi) => BoundaryRegion::MultiPolygon(multi),
            _ => return Err(GeoError::UnsupportedBoundary { index }),
        };
        boundaries.push(region);
    }

    Ok(Payload::Tracked(TrackedLocation {
        position,
        boundaries,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_inside;
    use serde_json::json;

    fn tracked_payload(x: f64, y: f64) -> serde_json::Value {
        json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": [x, y] }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                    }
                }
            ]
        })
    }

    #[test]
    fn error_payload_is_recognized() {
        let payload = decode_payload(json!({ "error": "no such subject" })).unwrap();
        assert!(matches!(payload, Payload::Error(detail) if detail == json!("no such subject")));
    }

    #[test]
    fn tracked_payload_decodes_point_and_boundaries() {
        let payload = decode_payload(tracked_payload(0.5, 0.5)).unwrap();

        let Payload::Tracked(location) = payload else {
            panic!("expected a tracked location");
        };
        assert_eq!(location.position, Point::new(0.5, 0.5));
        assert_eq!(location.boundaries.len(), 1);
        assert!(is_inside(&location.position, &location.boundaries));
    }

    #[test]
    fn position_only_payload_has_no_boundaries() {
        let payload = decode_payload(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": [0.5, 0.5] }
                }
            ]
        }))
        .unwrap();

        let Payload::Tracked(location) = payload else {
            panic!("expected a tracked location");
        };
        assert!(location.boundaries.is_empty());
        assert!(!is_inside(&location.position, &location.boundaries));
    }

    #[test]
    fn empty_feature_collection_is_malformed() {
        let result = decode_payload(json!({ "type": "FeatureCollection", "features": [] }));
        assert!(matches!(result, Err(GeoError::EmptyFeatureCollection)));
    }

    #[test]
    fn non_point_position_is_malformed() {
        let result = decode_payload(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                    }
                }
            ]
        }));
        assert!(matches!(result, Err(GeoError::PositionNotAPoint)));
    }

    #[test]
    fn line_boundary_is_malformed() {
        let result = decode_payload(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": { "type": "Point", "coordinates": [0.5, 0.5] }
                },
                {
                    "type": "Feature",
                    "properties": {},
                    "geometry": {
                        "type": "LineString",
                        "coordinates": [[0.0, 0.0], [1.0, 1.0]]
                    }
                }
            ]
        }));
        assert!(matches!(result, Err(GeoError::UnsupportedBoundary { index: 1 })));
    }

    #[test]
    fn non_geojson_payload_is_malformed() {
        let result = decode_payload(json!({ "features": "nope" }));
        assert!(matches!(result, Err(GeoError::InvalidGeoJson(_))));
    }
}
