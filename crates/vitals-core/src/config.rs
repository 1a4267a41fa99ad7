//! Configuration for the metrics log
//!
//! Settings can come from a small TOML document; every field has a default,
//! so an empty document is a valid configuration.
//!
//! ```toml
//! storage_key = "webVitals"
//! capacity = 10
//! mode = "development"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::VitalsError;

/// Storage key the log is persisted under
pub const DEFAULT_STORAGE_KEY: &str = "webVitals";

/// Maximum number of retained samples
pub const DEFAULT_CAPACITY: usize = 10;

/// Whether diagnostic output is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Development,
    Production,
}

impl ExecutionMode {
    /// Development for debug builds, production for release builds
    pub fn from_build() -> Self {
        if cfg!(debug_assertions) {
            ExecutionMode::Development
        } else {
            ExecutionMode::Production
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, ExecutionMode::Development)
    }
}

impl Default for ExecutionMode {
    fn default() -> Self {
        Self::from_build()
    }
}

/// Metrics log configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VitalsConfig {
    /// Storage key (default: "webVitals")
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Retained samples (default: 10)
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Execution mode (default: from the build profile)
    #[serde(default)]
    pub mode: ExecutionMode,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            capacity: default_capacity(),
            mode: ExecutionMode::default(),
        }
    }
}

impl VitalsConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or the values fail [`VitalsConfig::validate`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(s).context("Failed to parse TOML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the key is usable and the log can hold at least one sample
    pub fn validate(&self) -> Result<(), VitalsError> {
        if self.storage_key.trim().is_empty() {
            return Err(VitalsError::Config("storage_key must not be empty".to_string()));
        }
        if self.capacity == 0 {
            return Err(VitalsError::Config("capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}
