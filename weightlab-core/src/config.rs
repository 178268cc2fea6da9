//! Sampler definitions stored as TOML.
//!
//! ```toml
//! seed = 42
//!
//! [[entries]]
//! value = "common"
//! weight = 10.0
//!
//! [[entries]]
//! value = "rare"
//! weight = 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::error::SamplerError;
use crate::sampler::WeightedSampler;

/// Errors from loading or building a sampler config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("entry '{value}': {source}")]
    Sampler {
        value: String,
        #[source]
        source: SamplerError,
    },
}

/// One (value, weight) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryConfig {
    pub value: String,
    pub weight: f64,
}

/// A complete sampler definition: seed plus entries in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SamplerConfig {
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub entries: Vec<EntryConfig>,
}

impl SamplerConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the config to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build a sampler seeded with `self.seed` holding every entry.
    ///
    /// Fails on the first entry with an invalid weight.
    pub fn build(&self) -> Result<WeightedSampler<String>, ConfigError> {
        let mut sampler = WeightedSampler::new(self.seed);
        for entry in &self.entries {
            sampler
                .add(entry.value.clone(), entry.weight)
                .map_err(|source| ConfigError::Sampler {
                    value: entry.value.clone(),
                    source,
                })?;
        }
        Ok(sampler)
    }
}
