//! Payment gateway profile configuration

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::payment::{GatewayError, GatewaySecret, ProfileId, ResolvedProfile};

use super::error::ValidationError;

/// Credentials and endpoints of one gateway profile
///
/// Every field is optional at load time so that a missing value is reported
/// by name when the profile is used, instead of failing the whole load.
#[derive(Clone, Deserialize)]
pub struct ProfileConfig {
    /// Salt key used to compute `X-VERIFY`
    pub salt_key: Option<SecretString>,

    /// Index of the salt key, appended after `###`
    #[serde(default = "default_salt_index")]
    pub salt_index: u32,

    /// Merchant id issued by the gateway
    pub merchant_id: Option<String>,

    /// Gateway base URL (e.g. `https://api.phonepe.com`)
    pub base_url: Option<String>,

    /// Full pay URL override, used by the sandbox profile
    pub pay_url: Option<String>,
}

impl ProfileConfig {
    /// Create a profile with the default salt index.
    pub fn new(
        salt_key: impl Into<String>,
        merchant_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            salt_key: Some(SecretString::new(salt_key.into())),
            salt_index: default_salt_index(),
            merchant_id: Some(merchant_id.into()),
            base_url: Some(base_url.into()),
            pay_url: None,
        }
    }

    pub fn with_salt_index(mut self, salt_index: u32) -> Self {
        self.salt_index = salt_index;
        self
    }

    pub fn with_pay_url(mut self, pay_url: impl Into<String>) -> Self {
        self.pay_url = Some(pay_url.into());
        self
    }

    /// Validate the profile named `profile`
    pub fn validate(&self, profile: &str) -> Result<(), ValidationError> {
        let missing = |field| ValidationError::MissingField {
            profile: profile.to_string(),
            field,
        };

        if is_blank_secret(self.salt_key.as_ref()) {
            return Err(missing("salt_key"));
        }
        if is_blank(self.merchant_id.as_deref()) {
            return Err(missing("merchant_id"));
        }
        match self.base_url.as_deref() {
            None => return Err(missing("base_url")),
            Some(url) if url.trim().is_empty() => return Err(missing("base_url")),
            Some(url) if !is_http_url(url) => {
                return Err(ValidationError::InvalidUrl {
                    profile: profile.to_string(),
                    field: "base_url",
                })
            }
            Some(_) => {}
        }
        if let Some(url) = self.pay_url.as_deref() {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidUrl {
                    profile: profile.to_string(),
                    field: "pay_url",
                });
            }
        }
        if self.salt_index == 0 {
            return Err(ValidationError::InvalidSaltIndex {
                profile: profile.to_string(),
            });
        }
        Ok(())
    }

    /// Turn this configuration into the credentials for one call.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the profile fails validation.
    pub fn resolve(&self, id: &ProfileId) -> Result<ResolvedProfile, GatewayError> {
        self.validate(id.as_str())
            .map_err(|e| GatewayError::configuration(id, e.to_string()))?;

        // validate() guarantees these are present and non-blank
        let (Some(salt_key), Some(merchant_id), Some(base_url)) =
            (&self.salt_key, &self.merchant_id, &self.base_url)
        else {
            return Err(GatewayError::configuration(id, "incomplete profile"));
        };

        let secret = GatewaySecret::new(
            salt_key.expose_secret().clone(),
            self.salt_index,
            merchant_id.trim(),
        );
        let resolved = ResolvedProfile::new(id.clone(), secret, base_url.trim());

        Ok(match &self.pay_url {
            Some(pay_url) => resolved.with_pay_url(pay_url.trim()),
            None => resolved,
        })
    }
}

impl fmt::Debug for ProfileConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileConfig")
            .field("salt_key", &self.salt_key.as_ref().map(|_| "[REDACTED]"))
            .field("salt_index", &self.salt_index)
            .field("merchant_id", &self.merchant_id.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("pay_url", &self.pay_url)
            .finish()
    }
}

fn default_salt_index() -> u32 {
    1
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn is_blank_secret(value: Option<&SecretString>) -> bool {
    value.map_or(true, |v| v.expose_secret().trim().is_empty())
}

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("https://") || url.starts_with("http://")
}
