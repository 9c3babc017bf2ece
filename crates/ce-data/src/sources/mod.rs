pub mod csv_source;
pub mod geojson_source;
pub mod topojson;

use std::fs;
use std::path::Path;

use ce_core::CountyId;
use serde_json::{Number, Value};
use tracing::info;

pub use csv_source::{load_records, read_records};
pub use geojson_source::features_from_geojson;
pub use topojson::features_from_topology;

use crate::store::BoundaryFeature;
use crate::DataError;

/// Load county boundaries, detecting TopoJSON or GeoJSON from the top-level `type`
pub fn load_boundaries(path: &Path, topology_object: &str) -> Result<Vec<BoundaryFeature>, DataError> {
    let text = fs::read_to_string(path)?;
    let features = parse_boundaries(&text, topology_object)?;
    info!("Loaded {} county boundaries from {:?}", features.len(), path);
    Ok(features)
}

/// Parse boundary text in either supported format
pub fn parse_boundaries(text: &str, topology_object: &str) -> Result<Vec<BoundaryFeature>, DataError> {
    let value: Value = serde_json::from_str(text)?;
    let kind = value.get("type").and_then(Value::as_str).unwrap_or_default().to_string();

    match kind.as_str() {
        "Topology" => features_from_topology(value, topology_object),
        "FeatureCollection" => features_from_geojson(value),
        "" => Err(DataError::UnsupportedFormat("missing top-level 'type'".to_string())),
        other => Err(DataError::UnsupportedFormat(format!("unexpected top-level type '{}'", other))),
    }
}

/// County id from a JSON string or number
pub(crate) fn id_from_json(value: &Value) -> Option<CountyId> {
    match value {
        Value::String(id) if !id.trim().is_empty() => Some(CountyId::normalized(id)),
        Value::Number(number) => Some(id_from_number(number)),
        _ => None,
    }
}

pub(crate) fn id_from_number(number: &Number) -> CountyId {
    match number.as_u64() {
        Some(n) => CountyId::normalized(&n.to_string()),
        None => CountyId::normalized(&number.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_ids_are_padded() {
        assert_eq!(id_from_json(&json!(1001)).unwrap().as_str(), "01001");
        assert_eq!(id_from_json(&json!("01001")).unwrap().as_str(), "01001");
        assert!(id_from_json(&json!(null)).is_none());
        assert!(id_from_json(&json!("  ")).is_none());
    }

    #[test]
    fn test_format_detection() {
        let topology = r#"{"type":"Topology","arcs":[],"objects":{"counties":{"type":"GeometryCollection","geometries":[]}}}"#;
        assert!(parse_boundaries(topology, "counties").unwrap().is_empty());

        let geojson = r#"{"type":"FeatureCollection","features":[]}"#;
        assert!(parse_boundaries(geojson, "counties").unwrap().is_empty());

        let other = r#"{"type":"Sphere"}"#;
        assert!(matches!(parse_boundaries(other, "counties"), Err(DataError::UnsupportedFormat(_))));

        assert!(matches!(parse_boundaries("not json", "counties"), Err(DataError::Json(_))));
    }
}
