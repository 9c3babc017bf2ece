//! TopoJSON decoding
//!
//! Turns a topology's shared, optionally quantized arcs back into closed
//! polygon rings for the geometries of one named object.

use std::collections::HashMap;

use ce_core::CountyId;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::id_from_json;
use crate::store::BoundaryFeature;
use crate::DataError;

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    arcs: Vec<Vec<Vec<f64>>>,
    objects: HashMap<String, TopoObject>,
}

#[derive(Debug, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Deserialize)]
struct TopoObject {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    geometries: Vec<TopoGeometry>,
}

#[derive(Debug, Deserialize)]
struct TopoGeometry {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    arcs: Option<Value>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, Value>>,
}

type Rings = Vec<Vec<i64>>;

/// Decode the polygonal geometries of `object` into boundary features
pub fn features_from_topology(value: Value, object: &str) -> Result<Vec<BoundaryFeature>, DataError> {
    let topology: Topology = serde_json::from_value(value)?;

    let collection = topology
        .objects
        .get(object)
        .ok_or_else(|| DataError::InvalidTopology(format!("object '{}' not found", object)))?;
    if collection.kind != "GeometryCollection" {
        return Err(DataError::InvalidTopology(format!(
            "object '{}' is a {}, expected a GeometryCollection",
            object, collection.kind
        )));
    }

    let arcs = decode_arcs(&topology.arcs, topology.transform.as_ref());

    let mut features = Vec::with_capacity(collection.geometries.len());
    let mut skipped = 0usize;

    for geometry in &collection.geometries {
        let Some(id) = geometry_id(geometry) else {
            skipped += 1;
            continue;
        };

        let polygons = match (geometry.kind.as_str(), &geometry.arcs) {
            ("Polygon", Some(arcs_value)) => {
                let rings: Rings = serde_json::from_value(arcs_value.clone())?;
                vec![polygon(&rings, &arcs)?]
            }
            ("MultiPolygon", Some(arcs_value)) => {
                let parts: Vec<Rings> = serde_json::from_value(arcs_value.clone())?;
                parts
                    .iter()
                    .map(|rings| polygon(rings, &arcs))
                    .collect::<Result<Vec<_>, _>>()?
            }
            _ => {
                skipped += 1;
                continue;
            }
        };

        features.push(BoundaryFeature {
            id,
            geometry: MultiPolygon::new(polygons),
        });
    }

    if skipped > 0 {
        debug!("Skipped {} geometries without an id or polygon arcs", skipped);
    }

    Ok(features)
}

fn geometry_id(geometry: &TopoGeometry) -> Option<CountyId> {
    geometry
        .id
        .as_ref()
        .and_then(id_from_json)
        .or_else(|| geometry.properties.as_ref()?.get("id").and_then(id_from_json))
}

/// Apply delta decoding and the quantization transform when present
fn decode_arcs(arcs: &[Vec<Vec<f64>>], transform: Option<&Transform>) -> Vec<Vec<Coord<f64>>> {
    arcs.iter()
        .map(|arc| {
            let positions = arc.iter().filter(|p| p.len() >= 2);
            match transform {
                Some(t) => {
                    let (mut x, mut y) = (0.0, 0.0);
                    positions
                        .map(|p| {
                            x += p[0];
                            y += p[1];
                            Coord {
                                x: x * t.scale[0] + t.translate[0],
                                y: y * t.scale[1] + t.translate[1],
                            }
                        })
                        .collect()
                }
                None => positions.map(|p| Coord { x: p[0], y: p[1] }).collect(),
            }
        })
        .collect()
}

/// Stitch arcs into a ring. Negative indices (`!i`) walk arc `i` backwards.
fn ring(indices: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<LineString<f64>, DataError> {
    let mut coords: Vec<Coord<f64>> = Vec::new();

    for &index in indices {
        let (arc_idx, reversed) = if index < 0 { (!index as usize, true) } else { (index as usize, false) };
        let arc = arcs
            .get(arc_idx)
            .ok_or_else(|| DataError::InvalidTopology(format!("arc index {} out of range", index)))?;

        // consecutive arcs share their joining point
        let skip = usize::from(!coords.is_empty());
        if reversed {
            coords.extend(arc.iter().rev().skip(skip).copied());
        } else {
            coords.extend(arc.iter().skip(skip).copied());
        }
    }

    Ok(LineString::new(coords))
}

fn polygon(rings: &[Vec<i64>], arcs: &[Vec<Coord<f64>>]) -> Result<Polygon<f64>, DataError> {
    let mut rings = rings.iter().map(|indices| ring(indices, arcs));
    let exterior = rings
        .next()
        .ok_or_else(|| DataError::InvalidTopology("polygon without rings".to_string()))??;
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}
