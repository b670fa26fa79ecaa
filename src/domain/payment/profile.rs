//! Payment profiles and the credentials bound to them.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Name of a configured gateway profile (tenant).
///
/// Names are case-insensitive and stored lowercase, matching how the
/// configuration loader normalizes environment keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileId(String);

impl ProfileId {
    const PRODUCTION: &'static str = "production";
    const SANDBOX: &'static str = "sandbox";

    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    /// The live gateway profile.
    pub fn production() -> Self {
        Self(Self::PRODUCTION.to_string())
    }

    /// The sandbox profile used by test payments.
    pub fn sandbox() -> Self {
        Self(Self::SANDBOX.to_string())
    }

    pub fn is_sandbox(&self) -> bool {
        self.0 == Self::SANDBOX
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Salt key, key index and merchant id for exactly one profile.
///
/// The salt key is only ever used as signing input. `Debug` redacts both the
/// key and the merchant id.
#[derive(Clone)]
pub struct GatewaySecret {
    salt_key: SecretString,
    salt_index: u32,
    merchant_id: String,
}

impl GatewaySecret {
    pub fn new(salt_key: impl Into<String>, salt_index: u32, merchant_id: impl Into<String>) -> Self {
        Self {
            salt_key: SecretString::new(salt_key.into()),
            salt_index,
            merchant_id: merchant_id.into(),
        }
    }

    pub(crate) fn salt_key(&self) -> &str {
        self.salt_key.expose_secret()
    }

    pub fn salt_index(&self) -> u32 {
        self.salt_index
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }
}

impl fmt::Debug for GatewaySecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewaySecret")
            .field("salt_key", &"[REDACTED]")
            .field("salt_index", &self.salt_index)
            .field("merchant_id", &"[REDACTED]")
            .finish()
    }
}

/// Everything a single call needs to reach one gateway environment.
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub id: ProfileId,
    pub secret: GatewaySecret,
    /// Gateway base URL, without a trailing slash.
    pub base_url: String,
    /// Full pay endpoint override (the sandbox posts to a fixed URL).
    pub pay_url: Option<String>,
}

impl ResolvedProfile {
    pub fn new(id: ProfileId, secret: GatewaySecret, base_url: impl Into<String>) -> Self {
        Self {
            id,
            secret,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            pay_url: None,
        }
    }

    pub fn with_pay_url(mut self, pay_url: impl Into<String>) -> Self {
        self.pay_url = Some(pay_url.into());
        self
    }

    /// Joins a gateway path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
