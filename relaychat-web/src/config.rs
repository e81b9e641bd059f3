//! Frontend configuration module
//!
//! The browser cannot read a config file or the process environment, so the
//! gateway URL and storage key are fixed at build time.

use shared::config::ClientConfig;

/// Frontend configuration resolved from build-time environment
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    client: ClientConfig,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        let defaults = ClientConfig::with_defaults();
        Self {
            client: ClientConfig {
                gateway_url: option_env!("RELAYCHAT_GATEWAY_URL")
                    .map_or(defaults.gateway_url.clone(), str::to_string),
                storage_key: option_env!("RELAYCHAT_STORAGE_KEY")
                    .map_or(defaults.storage_key.clone(), str::to_string),
                log_level: defaults.log_level,
            },
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway base URL without a trailing slash
    pub fn gateway_url(&self) -> &str {
        self.client.gateway_base()
    }

    /// `localStorage` key of the thread id table
    pub fn storage_key(&self) -> &str {
        &self.client.storage_key
    }
}
