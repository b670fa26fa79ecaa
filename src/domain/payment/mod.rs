//! Payment gateway domain.
//!
//! Pure building blocks for talking to the gateway: body encoding, checksum
//! signing, profile credentials and normalized outcomes. No I/O happens here.
//!
//! # Module Structure
//!
//! - `encoding` - base64(JSON) transport encoding
//! - `checksum` - `X-VERIFY` signature construction
//! - `profile` - profile ids and per-profile secrets
//! - `status_query` - status lookup key and path
//! - `outcome` - normalized gateway results
//! - `errors` - structural failures raised before I/O

mod checksum;
mod encoding;
mod errors;
mod outcome;
mod profile;
mod status_query;

pub use checksum::{sign, sign_path, Signature};
pub use encoding::{encode, EncodedPayload};
pub use errors::GatewayError;
pub use outcome::{GatewayOutcome, GatewayResponse, TransportFailure, TransportFailureKind};
pub use profile::{GatewaySecret, ProfileId, ResolvedProfile};
pub use status_query::TransactionStatusQuery;

/// Gateway path of the pay endpoint, as signed.
pub const PAY_PATH: &str = "/pg/v1/pay";

/// URL path of the pay endpoint relative to the base URL.
pub const PAY_ENDPOINT: &str = "/apis/hermes/pg/v1/pay";
