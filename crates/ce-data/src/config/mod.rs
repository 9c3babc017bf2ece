//! Configuration for data loading

pub mod null_handling;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use null_handling::NullConfig;

/// Default object holding county geometries in a TopoJSON topology
pub const DEFAULT_TOPOLOGY_OBJECT: &str = "counties";

/// Where the two sources live and how to read them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    /// Tabular county attributes (CSV)
    pub data_path: PathBuf,

    /// County boundaries (TopoJSON or GeoJSON)
    pub boundaries_path: PathBuf,

    /// Object inside a TopoJSON topology that holds the counties
    pub topology_object: String,

    /// Missing-value handling for numeric cells
    pub null_config: NullConfig,
}

impl LoadConfig {
    pub fn new(data_path: impl Into<PathBuf>, boundaries_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            boundaries_path: boundaries_path.into(),
            topology_object: DEFAULT_TOPOLOGY_OBJECT.to_string(),
            null_config: NullConfig::default(),
        }
    }
}
