//! # Configuration
//!
//! Client settings shared by the web client and the command line tool.

use crate::ids::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
use std::{env, fs, path::Path};

#[cfg(all(test, not(target_arch = "wasm32")))]
mod integration_tests;

/// Gateway used when nothing else is configured.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";
/// Log level used when nothing else is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding [`ClientConfig::gateway_url`].
pub const ENV_GATEWAY_URL: &str = "RELAYCHAT_GATEWAY_URL";
/// Environment variable overriding [`ClientConfig::storage_key`].
pub const ENV_STORAGE_KEY: &str = "RELAYCHAT_STORAGE_KEY";
/// Environment variable overriding [`ClientConfig::log_level`].
pub const ENV_LOG_LEVEL: &str = "RELAYCHAT_LOG_LEVEL";

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid yaml or json
    #[error("Failed to parse configuration file {path}: {message}")]
    Parse { path: String, message: String },

    /// The file extension is neither yaml nor json
    #[error("Unsupported configuration format for {path}. Use 'yaml' or 'json'.")]
    UnsupportedFormat { path: String },

    /// A value the client cannot work with
    #[error("Invalid configuration: {field} - {message}")]
    Invalid { field: String, message: String },
}

/// Client configuration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API gateway
    pub gateway_url: String,

    /// Storage key (or file stem) of the thread id table
    pub storage_key: String,

    /// Logging level
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }

    /// Gateway URL without a trailing slash.
    #[must_use]
    pub fn gateway_base(&self) -> &str {
        self.gateway_url.trim_end_matches('/')
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// File values win; environment variables only fill in values that are
    /// still at their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration is invalid.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_config(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let parse_error = |message: String| ConfigError::Parse {
            path: display.clone(),
            message,
        };
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => {
                serde_yml::from_str(&content).map_err(|err| parse_error(err.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|err| parse_error(err.to_string()))
            }
            _ => Err(ConfigError::UnsupportedFormat {
                path: display.clone(),
            }),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn apply_env_overrides(&mut self) {
        let defaults = Self::with_defaults();
        if self.gateway_url == defaults.gateway_url
            && let Ok(url) = env::var(ENV_GATEWAY_URL)
        {
            self.gateway_url = url;
        }
        if self.storage_key == defaults.storage_key
            && let Ok(key) = env::var(ENV_STORAGE_KEY)
        {
            self.storage_key = key;
        }
        if self.log_level == defaults.log_level
            && let Ok(level) = env::var(ENV_LOG_LEVEL)
        {
            self.log_level = level;
        }
    }

    /// Checks the configuration for values the client cannot work with.
    ///
    /// # Errors
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gateway_url.starts_with("http://") || self.gateway_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "gateway_url".to_string(),
                message: format!("'{}' must be an http(s) URL", self.gateway_url),
            });
        }
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage_key".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
