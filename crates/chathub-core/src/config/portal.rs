//! Portal integration configuration.

use serde::{Deserialize, Serialize};

/// Portal integration configuration for the identity directory and the
/// message store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Backend provider: `"portal"` (REST clients) or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the portal, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Basic-auth username for the portal REST APIs.
    #[serde(default)]
    pub username: Option<String>,
    /// Basic-auth password for the portal REST APIs.
    #[serde(default)]
    pub password: Option<String>,
    /// Request timeout for portal calls in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Directory entries preloaded into the in-memory provider.
    #[serde(default)]
    pub seed: Vec<SeedEntry>,
}

/// One preloaded identity for the in-memory directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedEntry {
    /// Numeric user id.
    pub id: i64,
    /// Display name resolved for that id.
    pub name: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            username: None,
            password: None,
            request_timeout_seconds: default_request_timeout(),
            seed: Vec::new(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
