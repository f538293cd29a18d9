//! Configuration structures for the client and query cache
//!
//! All fields carry serde defaults so partial config files load cleanly.

use serde::{Deserialize, Serialize};

/// Default API base URL when no configuration source provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Top-level configuration for the workspace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL prepended to every relative API path (no trailing slash)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Total attempts per request (1 = no retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Query cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// How long an unsubscribed entry is retained before a sweep removes it
    #[serde(default = "default_retention_seconds")]
    pub retention_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { retention_seconds: default_retention_seconds() }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_attempts() -> usize {
    1
}

fn default_retention_seconds() -> u64 {
    300
}
