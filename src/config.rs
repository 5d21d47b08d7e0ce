//! Configuration types for summit-client

use serde::{Deserialize, Serialize};

/// Environment variable consulted by [`ClientConfig::from_env`]
pub const BASE_URL_ENV: &str = "SUMMIT_API_URL";

/// Client configuration
///
/// Only the base URL is configurable today. Timeouts are deliberately not
/// imposed by this layer; requests inherit the HTTP client's defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL the endpoint paths are appended to (default:
    /// "http://localhost:8000/api"). No trailing slash; endpoint paths
    /// start with one.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ClientConfig {
    /// Build a configuration from the environment
    ///
    /// Reads [`BASE_URL_ENV`]; falls back to the local development endpoint
    /// when unset or empty.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_base_url);
        Self { base_url }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}
