use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::query::Query;

/// Default: the public Amazing Marvin API
pub const DEFAULT_BASE_URL: &str = "https://serv.amazingmarvin.com/api";

/// Default per-request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Token sent as `X-API-Token`
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Query used when the command line doesn't give one
    #[serde(default)]
    pub default_query: Query,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_token: String::new(),
            base_url: default_base_url(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_query: Query::default(),
        }
    }
}

impl AppConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
