//! Engine configuration.
//!
//! Every section defaults to the built-in constants, so a config file only
//! needs to name the values it overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::osrm::OsrmConfig;
use crate::scorer::ScoreOptions;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoreOptions,
    pub osrm: OsrmConfig,
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let traffic = &self.scoring.traffic;
        if traffic.min_score > traffic.max_score {
            return Err(ConfigError::InvertedTrafficBounds {
                min: traffic.min_score,
                max: traffic.max_score,
            });
        }
        Ok(())
    }
}
