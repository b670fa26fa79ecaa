//! Resolver over an already loaded configuration.

use std::collections::HashMap;

use crate::config::{AppConfig, ProfileConfig};
use crate::domain::payment::{GatewayError, ProfileId, ResolvedProfile};
use crate::ports::CredentialResolver;

/// Resolves profiles from a fixed set of [`ProfileConfig`]s.
///
/// Use this when configuration is loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialResolver {
    profiles: HashMap<String, ProfileConfig>,
}

impl StaticCredentialResolver {
    pub fn new(profiles: HashMap<String, ProfileConfig>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|(name, config)| (ProfileId::new(name).as_str().to_string(), config))
            .collect();
        Self { profiles }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.profiles.clone())
    }

    /// Add or replace a profile.
    pub fn with_profile(mut self, id: ProfileId, config: ProfileConfig) -> Self {
        self.profiles.insert(id.as_str().to_string(), config);
        self
    }
}

impl CredentialResolver for StaticCredentialResolver {
    fn resolve(&self, profile: &ProfileId) -> Result<ResolvedProfile, GatewayError> {
        self.profiles
            .get(profile.as_str())
            .ok_or_else(|| GatewayError::configuration(profile, "profile is not configured"))?
            .resolve(profile)
    }
}
