//! Normalized results of a gateway round trip.
//!
//! A caller always receives one [`GatewayOutcome`]: the gateway's own reply
//! (accepted or rejected) or a transport failure. Nothing network related is
//! ever surfaced as an `Err`.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

/// Reply from the gateway, passed through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response body. Non-JSON replies are kept as a JSON string.
    pub body: Value,
}

impl GatewayResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Builds a response from raw body text.
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
        Self { status, body }
    }

    /// The gateway's `success` flag, if present.
    pub fn success(&self) -> Option<bool> {
        self.body.get("success").and_then(Value::as_bool)
    }

    /// The gateway's result code (e.g. `PAYMENT_SUCCESS`, `BAD_REQUEST`).
    pub fn code(&self) -> Option<&str> {
        self.body.get("code").and_then(Value::as_str)
    }

    /// The gateway's `data` object, if present.
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }
}

/// Why a request produced no gateway reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TransportFailureKind {
    /// The request exceeded the configured timeout.
    Timeout,

    /// No connection could be established (DNS, refused, TLS).
    Connect,

    /// The gateway answered with an error status and no body.
    EmptyResponse { status: u16 },

    /// Any other transport-level failure.
    Other,
}

impl fmt::Display for TransportFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailureKind::Timeout => write!(f, "timeout"),
            TransportFailureKind::Connect => write!(f, "connect"),
            TransportFailureKind::EmptyResponse { status } => {
                write!(f, "empty_response({})", status)
            }
            TransportFailureKind::Other => write!(f, "other"),
        }
    }
}

/// Normalized transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportFailure {
    #[serde(flatten)]
    pub kind: TransportFailureKind,
    pub message: String,
}

impl TransportFailure {
    pub fn new(kind: TransportFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Result of one gateway operation.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayOutcome {
    /// 2xx reply.
    Accepted(GatewayResponse),

    /// Non-2xx reply carrying the gateway's error body.
    Rejected(GatewayResponse),

    /// No usable reply.
    Failed(TransportFailure),
}

impl GatewayOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GatewayOutcome::Accepted(_))
    }

    /// The gateway's reply, if one was received.
    pub fn response(&self) -> Option<&GatewayResponse> {
        match self {
            GatewayOutcome::Accepted(response) | GatewayOutcome::Rejected(response) => {
                Some(response)
            }
            GatewayOutcome::Failed(_) => None,
        }
    }

    /// HTTP status of the reply, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayOutcome::Failed(TransportFailure {
                kind: TransportFailureKind::EmptyResponse { status },
                ..
            }) => Some(*status),
            other => other.response().map(|r| r.status),
        }
    }

    /// Collapses the outcome into a single JSON body for pass-through.
    pub fn into_body(self) -> Value {
        match self {
            GatewayOutcome::Accepted(response) | GatewayOutcome::Rejected(response) => {
                response.body
            }
            GatewayOutcome::Failed(failure) => json!({
                "success": false,
                "code": "TRANSPORT_ERROR",
                "message": failure.message,
                "data": { "failure": failure.kind },
            }),
        }
    }
}
