//! Run configuration loaded from TOML.

use crate::presets::Preset;
use crate::scenario::ScenarioConfig;
use chemotaxis_core::{Domain, ModelError, ModelParameters, PhysicalParameters};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid model parameters: {0}")]
    Model(#[from] ModelError),
}

/// Lattice and physics of a run.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct ModelConfig {
    #[serde(default)]
    pub domain: Domain,
    #[serde(default)]
    pub physics: PhysicalParameters,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub model: ModelConfig,
    pub scenario: ScenarioConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Preset::Split.config()
    }
}

impl AppConfig {
    /// Reads `path`, falling back to the default configuration when the file
    /// does not exist. A file that exists but does not parse is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml(&content)?;
                tracing::info!(path = %path.display(), "Configuration loaded");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No configuration file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Validates the model section into integrator-ready parameters.
    pub fn model_parameters(&self) -> Result<ModelParameters, ConfigError> {
        Ok(ModelParameters::new(
            self.model.domain,
            self.model.physics,
        )?)
    }
}
