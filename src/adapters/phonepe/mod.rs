//! PhonePe-style payment gateway adapter.
//!
//! Implements the signed request flow of the Hermes PG API:
//! - Payment submission (production and tenant profiles)
//! - Sandbox test payments
//! - Live transaction status lookups
//!
//! # Security
//!
//! - Every request carries a fresh `X-VERIFY` checksum; nothing is cached
//! - Salt keys live in `secrecy::SecretString` and are never logged
//! - Calls are bounded by the configured request and connect timeouts
//!
//! # Configuration
//!
//! Profiles are read from `PAYGATE__PROFILES__<NAME>__*` environment variables
//! (see [`crate::config`]).

mod gateway_client;
mod mock_transport;
mod reqwest_transport;

pub use gateway_client::GatewayClient;
pub use mock_transport::MockGatewayTransport;
pub use reqwest_transport::ReqwestTransport;
