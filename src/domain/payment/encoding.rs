//! Canonical transport encoding of request bodies.
//!
//! A body is serialized to compact JSON and then base64 encoded (standard
//! alphabet, padded). The same bytes are signed and transmitted, so this is
//! the only place a body is ever serialized.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use super::GatewayError;

/// Base64 form of a serialized request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decodes the payload back into the JSON value that produced it.
    pub fn decode_json(&self) -> Result<serde_json::Value, GatewayError> {
        let bytes = STANDARD
            .decode(&self.0)
            .map_err(|e| GatewayError::encoding(format!("invalid base64: {}", e)))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl AsRef<str> for EncodedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Serializes `body` and base64 encodes the result.
///
/// # Errors
///
/// Returns `GatewayError::Encoding` if `body` cannot be represented as JSON
/// (for example a map with non-string keys).
pub fn encode<T>(body: &T) -> Result<EncodedPayload, GatewayError>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(body)?;
    Ok(EncodedPayload(STANDARD.encode(json.as_bytes())))
}
