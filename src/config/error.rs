//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required profile missing: {0}")]
    MissingProfile(&'static str),

    #[error("Profile '{profile}' is missing {field}")]
    MissingField {
        profile: String,
        field: &'static str,
    },

    #[error("Profile '{profile}' has an invalid {field}: must be an http(s) URL")]
    InvalidUrl {
        profile: String,
        field: &'static str,
    },

    #[error("Profile '{profile}' has an invalid salt index: must be at least 1")]
    InvalidSaltIndex { profile: String },

    #[error("Invalid HTTP timeout: must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
