//! Build-time configuration for the identity service endpoint.
//!
//! The two values are baked in at compile time (the WASM bundle is static;
//! there is no server to ask at runtime) and validated before anything
//! renders, so a misconfigured build fails fast instead of producing an app
//! that cannot authenticate anyone.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;

/// Environment variable holding the identity service base URL.
pub const IDENTITY_URL_VAR: &str = "DASHGATE_IDENTITY_URL";

/// Environment variable holding the identity service public API key.
pub const IDENTITY_KEY_VAR: &str = "DASHGATE_IDENTITY_KEY";

/// Validated identity service configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the identity service, without a trailing slash.
    pub service_url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
}

impl Config {
    /// Validate raw configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if either value is absent or blank.
    pub fn from_parts(
        service_url: Option<&str>,
        anon_key: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let service_url = service_url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(IDENTITY_URL_VAR))?;
        let anon_key = anon_key
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing(IDENTITY_KEY_VAR))?;

        Ok(Self {
            service_url: service_url.trim_end_matches('/').to_owned(),
            anon_key: anon_key.to_owned(),
        })
    }

    /// Read configuration captured from the build environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if the build was produced without
    /// `DASHGATE_IDENTITY_URL` or `DASHGATE_IDENTITY_KEY` set.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_parts(
            option_env!("DASHGATE_IDENTITY_URL"),
            option_env!("DASHGATE_IDENTITY_KEY"),
        )
    }
}
