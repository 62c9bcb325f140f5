//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod backend;
pub mod logging;
pub mod share;

use serde::{Deserialize, Serialize};

use self::backend::BackendConfig;
use self::logging::LoggingConfig;
use self::share::ShareConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`ATS__BACKEND__BASE_URL`, ...).
const ENV_PREFIX: &str = "ATS";

/// Root application configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (base file + environment overlay + `ATS__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// REST backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Shareable link defaults.
    #[serde(default)]
    pub share: ShareConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the base file at `path` with an environment-specific overlay
    /// `config/{env}` and environment variables prefixed with `ATS__`.
    /// Missing files are skipped, so defaults apply when nothing is found.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every backend call or derived URL invalid.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(AppError::configuration("backend.base_url must not be empty"));
        }
        if self.share.origin.trim().is_empty() {
            return Err(AppError::configuration("share.origin must not be empty"));
        }
        if self.share.default_expiry_days == 0 {
            return Err(AppError::configuration(
                "share.default_expiry_days must be at least 1",
            ));
        }
        Ok(())
    }
}
