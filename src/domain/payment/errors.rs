//! Structural errors raised before any network I/O.
//!
//! Everything that can go wrong *after* a request leaves the process is
//! reported as a [`GatewayOutcome`](super::GatewayOutcome) value instead.

use thiserror::Error;

use super::ProfileId;

/// Failures that abort a gateway operation before the HTTP call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request body could not be serialized.
    #[error("Request body could not be encoded: {0}")]
    Encoding(String),

    /// The requested profile has no usable credentials.
    #[error("Profile '{profile}' is not usable: {reason}")]
    Configuration { profile: String, reason: String },

    /// A status query segment is empty or malformed.
    #[error("Invalid status query: {0}")]
    InvalidQuery(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    HttpClient(String),
}

impl GatewayError {
    pub fn encoding(message: impl Into<String>) -> Self {
        GatewayError::Encoding(message.into())
    }

    pub fn configuration(profile: &ProfileId, reason: impl Into<String>) -> Self {
        GatewayError::Configuration {
            profile: profile.as_str().to_string(),
            reason: reason.into(),
        }
    }

    pub fn invalid_query(message: impl Into<String>) -> Self {
        GatewayError::InvalidQuery(message.into())
    }

    /// Check if this error is a configuration problem.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GatewayError::Configuration { .. })
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Encoding(err.to_string())
    }
}
