use ce_core::CountyId;
use geo_types::{Geometry, MultiPolygon};
use geojson::feature::Id;
use geojson::{Feature, GeoJson};
use serde_json::Value;
use tracing::debug;

use super::{id_from_json, id_from_number};
use crate::store::BoundaryFeature;
use crate::DataError;

/// Read polygon features from a GeoJSON FeatureCollection
pub fn features_from_geojson(value: Value) -> Result<Vec<BoundaryFeature>, DataError> {
    let collection = match GeoJson::from_json_value(value)? {
        GeoJson::FeatureCollection(collection) => collection,
        other => {
            return Err(DataError::UnsupportedFormat(format!(
                "expected a FeatureCollection, found {}",
                geojson_kind(&other)
            )))
        }
    };

    let mut features = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;

    for feature in collection.features {
        let Some(id) = feature_id(&feature) else {
            skipped += 1;
            continue;
        };
        let Some(geometry) = feature.geometry else {
            skipped += 1;
            continue;
        };

        let geometry = match Geometry::<f64>::try_from(geometry)? {
            Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon]),
            Geometry::MultiPolygon(multi) => multi,
            _ => {
                skipped += 1;
                continue;
            }
        };

        features.push(BoundaryFeature { id, geometry });
    }

    if skipped > 0 {
        debug!("Skipped {} features without an id or polygon geometry", skipped);
    }

    Ok(features)
}

fn feature_id(feature: &Feature) -> Option<CountyId> {
    match &feature.id {
        Some(Id::String(id)) => Some(CountyId::normalized(id)),
        Some(Id::Number(number)) => Some(id_from_number(number)),
        None => feature.property("id").and_then(id_from_json),
    }
}

fn geojson_kind(geojson: &GeoJson) -> &'static str {
    match geojson {
        GeoJson::Geometry(_) => "a Geometry",
        GeoJson::Feature(_) => "a Feature",
        GeoJson::FeatureCollection(_) => "a FeatureCollection",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square(x: f64) -> Value {
        json!([[[x, 0.0], [x + 1.0, 0.0], [x + 1.0, 1.0], [x, 1.0], [x, 0.0]]])
    }

    #[test]
    fn test_reads_ids_from_feature_or_properties() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "id": "01001", "properties": {}, "geometry": { "type": "Polygon", "coordinates": square(0.0) } },
                { "type": "Feature", "id": 1003, "properties": {}, "geometry": { "type": "Polygon", "coordinates": square(1.0) } },
                { "type": "Feature", "properties": { "id": "06037" }, "geometry": { "type": "MultiPolygon", "coordinates": [square(2.0)] } },
                { "type": "Feature", "properties": {}, "geometry": { "type": "Polygon", "coordinates": square(3.0) } },
                { "type": "Feature", "id": "01005", "properties": {}, "geometry": { "type": "Point", "coordinates": [0.0, 0.0] } }
            ]
        });

        let features = features_from_geojson(collection).unwrap();
        let ids: Vec<&str> = features.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["01001", "01003", "06037"]);
        assert_eq!(features[2].geometry.0.len(), 1);
    }

    #[test]
    fn test_rejects_bare_geometry() {
        let geometry = json!({ "type": "Polygon", "coordinates": square(0.0) });
        let err = features_from_geojson(geometry).unwrap_err();
        assert!(matches!(err, DataError::UnsupportedFormat(_)));
    }
}
