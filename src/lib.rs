//! Paygate - Signed request client for the PhonePe-style payment gateway
//!
//! This crate builds checksum-signed requests for the gateway's pay and
//! status endpoints, sends them over HTTP and normalizes every reply into a
//! single [`GatewayOutcome`](domain::payment::GatewayOutcome).
//!
//! # Example
//!
//! ```no_run
//! use paygate::adapters::GatewayClient;
//! use paygate::config::AppConfig;
//! use paygate::domain::payment::ProfileId;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load_validated()?;
//! let client = GatewayClient::from_config(&config)?;
//!
//! let body = json!({
//!     "merchantId": "MERCHANTUAT",
//!     "merchantTransactionId": "MT7850590068188104",
//!     "amount": 10000,
//!     "paymentInstrument": { "type": "PAY_PAGE" }
//! });
//!
//! let outcome = client.submit_payment(&body, &ProfileId::production()).await?;
//! println!("{}", outcome.into_body());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
