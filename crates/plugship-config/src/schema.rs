//! Configuration schema.

use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Store connection configuration.
    #[serde(default)]
    pub store: StoreConfig,

    /// Authentication defaults.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Store connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the marketplace API.
    #[serde(default = "default_store_url")]
    pub url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_store_url() -> String {
    "https://marketplace.plugship.dev".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

/// Authentication defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Username used when the CLI flag and environment are absent.
    pub username: Option<String>,
}
