//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the gateway client and the outside world. Adapters implement these ports.
//!
//! - `CredentialResolver` - Per-profile secret lookup
//! - `GatewayTransport` - HTTP delivery of signed requests

mod credential_resolver;
mod gateway_transport;

pub use credential_resolver::CredentialResolver;
pub use gateway_transport::{
    GatewayRequest, GatewayTransport, HttpMethod, TransportError, TransportResponse,
};
