//! HTTP transport port for gateway calls.
//!
//! The client builds a fully signed [`GatewayRequest`] and hands it to a
//! transport. Implementations only move bytes: they never sign, retry or
//! interpret the gateway's reply.

use std::fmt;

use async_trait::async_trait;

use crate::domain::payment::{TransportFailure, TransportFailureKind};

/// Port for sending one request to the gateway.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// Sends the request and returns the raw reply, whatever its status.
    ///
    /// Only failures to obtain a reply are errors.
    async fn send(&self, request: GatewayRequest) -> Result<TransportResponse, TransportError>;
}

/// HTTP method used by the gateway endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// A signed request ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl GatewayRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: Vec::new(),
            body: Some(body.into()),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Raw reply from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to obtain any reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: TransportFailureKind,
    pub message: String,
}

impl TransportError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: TransportFailureKind::Timeout,
            message: message.into(),
        }
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self {
            kind: TransportFailureKind::Connect,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: TransportFailureKind::Other,
            message: message.into(),
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for TransportError {}

impl From<TransportError> for TransportFailure {
    fn from(err: TransportError) -> Self {
        TransportFailure::new(err.kind, err.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_transport_is_object_safe() {
        fn _accepts_dyn(_transport: &dyn GatewayTransport) {}
    }

    #[test]
    fn header_lookup_ignores_case() {
        let request = GatewayRequest::get("https://example.com").with_header("X-VERIFY", "abc###1");
        assert_eq!(request.header("x-verify"), Some("abc###1"));
        assert_eq!(request.header("X-MERCHANT-ID"), None);
    }

    #[test]
    fn success_range() {
        assert!(TransportResponse::new(200, "").is_success());
        assert!(TransportResponse::new(204, "").is_success());
        assert!(!TransportResponse::new(302, "").is_success());
        assert!(!TransportResponse::new(400, "").is_success());
    }

    #[test]
    fn transport_error_converts_to_failure() {
        let failure: TransportFailure = TransportError::connect("connection refused").into();
        assert_eq!(failure.kind, TransportFailureKind::Connect);
        assert_eq!(failure.message, "connection refused");
    }

    #[test]
    fn method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
    }
}
