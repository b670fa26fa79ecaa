//! Resolver that reads the process environment on every call.

use crate::config::{environment_source, ProfileConfig, ENV_PREFIX};
use crate::domain::payment::{GatewayError, ProfileId, ResolvedProfile};
use crate::ports::CredentialResolver;

/// Resolves `{prefix}__PROFILES__{NAME}__*` environment variables at call
/// time, so changed variables apply without a restart.
#[derive(Debug, Clone)]
pub struct EnvCredentialResolver {
    prefix: String,
}

impl EnvCredentialResolver {
    /// Resolver over the `PAYGATE` prefix. Loads `.env` if present.
    pub fn new() -> Self {
        dotenvy::dotenv().ok();
        Self::with_prefix(ENV_PREFIX)
    }

    /// Resolver over a custom prefix. Does not read `.env`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn load_profile(&self, profile: &ProfileId) -> Result<ProfileConfig, GatewayError> {
        let source = environment_source(&self.prefix)
            .build()
            .map_err(|e| GatewayError::configuration(profile, e.to_string()))?;

        match source.get::<ProfileConfig>(&format!("profiles.{}", profile.as_str())) {
            Ok(config) => Ok(config),
            Err(config::ConfigError::NotFound(_)) => Err(GatewayError::configuration(
                profile,
                "profile is not configured",
            )),
            Err(e) => Err(GatewayError::configuration(profile, e.to_string())),
        }
    }
}

impl Default for EnvCredentialResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialResolver for EnvCredentialResolver {
    fn resolve(&self, profile: &ProfileId) -> Result<ResolvedProfile, GatewayError> {
        let resolved = self.load_profile(profile)?.resolve(profile)?;
        tracing::debug!(
            profile = %profile,
            salt_index = resolved.secret.salt_index(),
            "Resolved gateway credentials"
        );
        Ok(resolved)
    }
}
