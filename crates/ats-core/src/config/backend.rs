//! REST backend connection configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the placement backend that owns link records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the REST API, e.g. `https://placement.example.edu/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer access token sent with every request.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Field naming the backend expects in request bodies.
    #[serde(default)]
    pub request_casing: BodyCasing,
}

/// Key casing of JSON request bodies.
///
/// Responses are always accepted in snake_case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyCasing {
    /// `permission_level`, `expires_in_days`
    #[default]
    #[serde(rename = "snake_case")]
    SnakeCase,
    /// `permissionLevel`, `expiresInDays`
    #[serde(rename = "camelCase")]
    CamelCase,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            access_token: None,
            request_timeout_seconds: default_request_timeout(),
            request_casing: BodyCasing::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
