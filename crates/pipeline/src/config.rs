//! Pipeline configuration.
//!
//! Every knob has a default, so an empty YAML file (or no file at all) gives
//! the standard model: 5000 features, top-3 cast, directors only,
//! case-sensitive tokens, 5 recommendations.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Upper bound on vocabulary size
    pub max_features: usize,
    /// How many billed cast members make it into the tags
    pub cast_limit: usize,
    /// Crew `job` value that selects directors
    pub director_job: String,
    /// Fold tokens to lowercase before counting
    pub lowercase: bool,
    /// Recommendations returned per query
    pub top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            cast_limit: 3,
            director_job: "Director".to_string(),
            lowercase: false,
            top_k: 5,
        }
    }
}

impl PipelineConfig {
    /// Load from a YAML file; absent keys keep their defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document, which should mean "all defaults"
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_features == 0 {
            return Err(ConfigError::Invalid("max_features must be at least 1".into()));
        }
        if self.top_k == 0 {
            return Err(ConfigError::Invalid("top_k must be at least 1".into()));
        }
        Ok(())
    }
}
