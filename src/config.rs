//! Configuration types.
//!
//! All external configuration is read once, here, and handed to flows as an
//! explicit [`AppConfig`]. No other module touches the environment.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Application configuration for the onboarding flows.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the profile directory REST API.
    pub directory_base_url: String,
    /// API key for the profile directory.
    pub directory_api_key: SecretString,
    /// The application's own numeric identifier, used as the viewer fid on
    /// id-keyed directory lookups.
    pub app_fid: u64,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `CAST_ONBOARD_DIRECTORY_URL` and `CAST_ONBOARD_DIRECTORY_API_KEY` are
    /// required; `CAST_ONBOARD_APP_FID` defaults to 1.
    pub fn from_env() -> Result<Self, ConfigError> {
        let directory_base_url = std::env::var("CAST_ONBOARD_DIRECTORY_URL")
            .map_err(|_| ConfigError::MissingEnvVar("CAST_ONBOARD_DIRECTORY_URL".to_string()))?;
        let api_key = std::env::var("CAST_ONBOARD_DIRECTORY_API_KEY").map_err(|_| {
            ConfigError::MissingEnvVar("CAST_ONBOARD_DIRECTORY_API_KEY".to_string())
        })?;
        let app_fid = match std::env::var("CAST_ONBOARD_APP_FID") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CAST_ONBOARD_APP_FID".to_string(),
                message: format!("expected a numeric fid, got {raw:?}"),
            })?,
            Err(_) => 1,
        };

        Ok(Self {
            directory_base_url,
            directory_api_key: SecretString::from(api_key),
            app_fid,
        })
    }
}
