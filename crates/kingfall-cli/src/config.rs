//! Configuration file loading for the terminal front end.
//!
//! Settings live in a TOML file (`kingfall.toml` in the working directory by
//! default). Every field is optional; a missing file yields the defaults.

use kingfall_engine::{SelectorConfig, SelectorConfigError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The `[selector]` table holds unusable values.
    #[error("Invalid selector settings: {0}")]
    InvalidSelector(#[from] SelectorConfigError),
}

/// Application configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Seed for the computer's random jitter. Drawn from entropy if absent.
    pub seed: Option<u64>,
    /// Pause before the computer replies, in milliseconds.
    pub think_delay_ms: u64,
    /// Move-selection weights.
    pub selector: SelectorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            seed: None,
            think_delay_ms: 500,
            selector: SelectorConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from `path`.
    ///
    /// Returns the defaults if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if the file contains invalid TOML, or
    /// [`ConfigError::InvalidSelector`] if the selector settings are unusable.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that parse but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selector.validate()?;
        Ok(())
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("kingfall.toml")
    }
}
