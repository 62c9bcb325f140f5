//! Shareable link defaults.

use serde::{Deserialize, Serialize};

/// Settings applied when links are created and presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Origin used to build `{origin}/shared/{token}` when the backend
    /// omits the full URL.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Lifetime requested for newly created links.
    #[serde(default = "default_expiry_days")]
    pub default_expiry_days: u32,
    /// Permission tier used when none is requested (`VIEW`, `COMMENT`, `EDIT`, `FULL`).
    #[serde(default = "default_permission")]
    pub default_permission: String,
    /// How long the "copied" indicator stays set after a copy.
    #[serde(default = "default_copied_feedback")]
    pub copied_feedback_seconds: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            default_expiry_days: default_expiry_days(),
            default_permission: default_permission(),
            copied_feedback_seconds: default_copied_feedback(),
        }
    }
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_expiry_days() -> u32 {
    30
}

fn default_permission() -> String {
    "VIEW".to_string()
}

fn default_copied_feedback() -> u64 {
    3
}
