//! Domain layer containing the gateway protocol types.
//!
//! # Module Organization
//!
//! - `payment` - Encoding, signing, profiles and outcomes for the payment gateway

pub mod payment;
