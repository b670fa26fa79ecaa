//! Credential resolution port.
//!
//! Maps a profile name to the secret, merchant id and URLs of exactly one
//! gateway environment.

use crate::domain::payment::{GatewayError, ProfileId, ResolvedProfile};

/// Port for looking up profile credentials.
///
/// Implementations must fail with `GatewayError::Configuration` rather than
/// return an empty or placeholder salt key.
pub trait CredentialResolver: Send + Sync {
    /// Resolve the credentials for `profile`.
    fn resolve(&self, profile: &ProfileId) -> Result<ResolvedProfile, GatewayError>;
}
