//! Dashboard configuration
//!
//! Built from defaults, then an optional JSON file, then command line flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ce_core::{Attribute, AttributeSelection};
use ce_data::config::DEFAULT_TOPOLOGY_OBJECT;
use ce_data::{LoadConfig, NullConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cli::CliArgs;

/// Picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "county-explorer.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub boundaries_path: PathBuf,
    pub topology_object: String,
    pub x_attribute: Attribute,
    pub y_attribute: Attribute,
    pub map_attribute: Attribute,
    pub histogram_thresholds: usize,
    /// Replaces the default missing-value patterns when set
    pub null_patterns: Option<Vec<String>>,
    pub dark_mode: bool,
    pub demo: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let attributes = AttributeSelection::default();
        Self {
            data_path: PathBuf::from("data.csv"),
            boundaries_path: PathBuf::from("counties-10m.json"),
            topology_object: DEFAULT_TOPOLOGY_OBJECT.to_string(),
            x_attribute: attributes.x,
            y_attribute: attributes.y,
            map_attribute: attributes.map,
            histogram_thresholds: 20,
            null_patterns: None,
            dark_mode: true,
            demo: false,
        }
    }
}

/// Where the dashboard gets its data from
#[derive(Debug, Clone)]
pub enum DataSource {
    Files(LoadConfig),
    Demo,
}

impl DashboardConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Resolve against the current working directory
    pub fn resolve(args: &CliArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read the working directory")?;
        Self::resolve_in(args, &cwd)
    }

    /// Defaults, then the config file, then flags. `dir` is where the
    /// default config file is looked up.
    pub fn resolve_in(args: &CliArgs, dir: &Path) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = dir.join(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    info!("Using config file {}", fallback.display());
                    Self::from_file(&fallback)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(data) = &args.data {
            config.data_path = data.clone();
        }
        if let Some(boundaries) = &args.boundaries {
            config.boundaries_path = boundaries.clone();
        }
        if args.demo {
            config.demo = true;
        }
        Ok(config)
    }

    pub fn attributes(&self) -> AttributeSelection {
        AttributeSelection {
            x: self.x_attribute,
            y: self.y_attribute,
            map: self.map_attribute,
        }
    }

    pub fn load_config(&self) -> LoadConfig {
        let mut load = LoadConfig::new(&self.data_path, &self.boundaries_path);
        load.topology_object = self.topology_object.clone();
        if let Some(patterns) = &self.null_patterns {
            load.null_config = NullConfig::with_patterns(patterns.clone());
        }
        load
    }

    /// The demo dataset only runs when asked for; unreachable files fail the load
    pub fn data_source(&self) -> DataSource {
        if self.demo {
            DataSource::Demo
        } else {
            DataSource::Files(self.load_config())
        }
    }
}
