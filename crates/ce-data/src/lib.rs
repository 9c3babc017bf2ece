//! Data loading for the county explorer
//!
//! Reads the tabular county source and the boundary source, then joins them
//! into an immutable [`Dataset`].

pub mod config;
pub mod loader;
pub mod sources;
pub mod store;

use tokio::task::JoinError;
use thiserror::Error;

// Re-exports
pub use config::{LoadConfig, NullConfig};
pub use loader::load_dataset;
pub use store::{join_features, BoundaryFeature, Dataset, EnrichedFeature};

/// Errors that can occur while loading data
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    #[error("Unsupported boundary format: {0}")]
    UnsupportedFormat(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<geojson::Error> for DataError {
    fn from(error: geojson::Error) -> Self {
        DataError::UnsupportedFormat(error.to_string())
    }
}
