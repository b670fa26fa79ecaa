//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the gateway client to external systems:
//! - `credentials` - Profile credential resolvers (environment, static)
//! - `phonepe` - Gateway client and HTTP transports

pub mod credentials;
pub mod phonepe;

pub use credentials::{EnvCredentialResolver, StaticCredentialResolver};
pub use phonepe::{GatewayClient, MockGatewayTransport, ReqwestTransport};
