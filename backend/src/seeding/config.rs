//! Seeding configuration
//!
//! Loaded from JSON; every field has a default so `{}` is a valid config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::hash_seed::{is_valid_var_name, DEFAULT_HASH_SEED_VAR};

/// Errors that can occur while loading or validating a [`SeedConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid hash seed variable name: {0:?}")]
    InvalidHashSeedVar(String),

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a [`crate::SeedInitializer`]
///
/// # Example
/// ```
/// use seedkit_core::SeedConfig;
///
/// let config = SeedConfig::from_json_str(r#"{"seed": 42}"#).unwrap();
/// assert_eq!(config.seed, Some(42));
/// assert!(config.deterministic);
/// assert_eq!(config.hash_seed_var.as_deref(), Some("PYTHONHASHSEED"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// Seed to apply; `None` generates one from OS entropy.
    pub seed: Option<u64>,

    /// Prefer reproducible tensor kernels over faster nondeterministic ones.
    pub deterministic: bool,

    /// Hash-seed environment variable; `None` skips that step.
    pub hash_seed_var: Option<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            seed: None,
            deterministic: true,
            hash_seed_var: Some(DEFAULT_HASH_SEED_VAR.to_string()),
        }
    }
}

impl SeedConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match &self.hash_seed_var {
            Some(var) if !is_valid_var_name(var) => {
                Err(ConfigError::InvalidHashSeedVar(var.clone()))
            }
            _ => Ok(()),
        }
    }
}
