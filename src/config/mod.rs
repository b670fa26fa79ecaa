//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PAYGATE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use paygate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Request timeout: {:?}", config.http.timeout());
//! ```

mod error;
mod http;
mod payment;
mod telemetry;

pub use error::{ConfigError, ValidationError};
pub use http::HttpConfig;
pub use payment::ProfileConfig;
pub use telemetry::TelemetryConfig;

use std::collections::HashMap;

use serde::Deserialize;

/// Environment variable prefix for all settings
pub const ENV_PREFIX: &str = "PAYGATE";

/// Separator between nested keys in environment variable names
pub const ENV_SEPARATOR: &str = "__";

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Gateway profiles keyed by lowercase profile name
    #[serde(default)]
    pub profiles: HashMap<String, ProfileConfig>,

    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAYGATE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PAYGATE__PROFILES__PRODUCTION__SALT_KEY=...` -> `profiles.production.salt_key`
    /// - `PAYGATE__HTTP__TIMEOUT_SECS=15` -> `http.timeout_secs = 15`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load_with_prefix(ENV_PREFIX)
    }

    /// Load configuration from environment variables with a custom prefix
    ///
    /// Does not read `.env`.
    pub fn load_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let config = environment_source(prefix)
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Requires both a production and a sandbox profile, then validates every
    /// configured profile plus the HTTP and telemetry sections.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for required in ["production", "sandbox"] {
            if !self.profiles.contains_key(required) {
                return Err(ValidationError::MissingProfile(required));
            }
        }

        let mut names: Vec<&String> = self.profiles.keys().collect();
        names.sort();
        for name in names {
            self.profiles[name].validate(name)?;
        }

        self.http.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder reading `{prefix}__...` environment variables.
pub(crate) fn environment_source(
    prefix: &str,
) -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder().add_source(
        config::Environment::with_prefix(prefix)
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR),
    )
}
