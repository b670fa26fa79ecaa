//! `X-VERIFY` checksum construction.
//!
//! The gateway authenticates a request by recomputing
//! `sha256(payload || path || salt_key)` and comparing it to the hex digest the
//! client sends, followed by `###` and the index of the salt key used.

use std::fmt;

use sha2::{Digest, Sha256};

use super::GatewaySecret;

/// Separator between the digest and the salt index.
const INDEX_SEPARATOR: &str = "###";

/// A computed `X-VERIFY` header value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The hex digest without the index suffix.
    pub fn digest(&self) -> &str {
        self.0
            .split_once(INDEX_SEPARATOR)
            .map(|(digest, _)| digest)
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Signs an encoded payload for `gateway_path`.
pub fn sign(payload: &str, gateway_path: &str, secret: &GatewaySecret) -> Signature {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    hasher.update(gateway_path.as_bytes());
    hasher.update(secret.salt_key().as_bytes());
    finish(hasher, secret.salt_index())
}

/// Signs a bodiless request: the raw path is the signed material.
pub fn sign_path(gateway_path: &str, secret: &GatewaySecret) -> Signature {
    sign("", gateway_path, secret)
}

fn finish(hasher: Sha256, salt_index: u32) -> Signature {
    let digest = hasher.finalize();
    Signature(format!(
        "{}{}{}",
        hex_encode(&digest),
        INDEX_SEPARATOR,
        salt_index
    ))
}

/// Lowercase hex encoding.
pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::encode;
    use proptest::prelude::*;
    use serde_json::json;

    const PAY_PATH: &str = "/pg/v1/pay";

    fn salt(key: &str) -> GatewaySecret {
        GatewaySecret::new(key, 1, "M1")
    }

    #[test]
    fn pinned_pay_vector() {
        let payload = encode(&json!({"merchantId": "M1", "amount": 100})).unwrap();
        let signature = sign(payload.as_str(), PAY_PATH, &salt("test-salt"));

        assert_eq!(
            signature.as_str(),
            "48be7370e6701252b204ad7fabe9b35aa8029b940ea209c18394b31aaa290cf3###1"
        );
    }

    #[test]
    fn pinned_status_vector() {
        let signature = sign_path("/pg/v1/status/M1/T123", &salt("test-salt"));

        assert_eq!(
            signature.as_str(),
            "3673473841a334ace2d1eb9d1a31acba3ffa05ed3e40a89cd453eda5b7418f2e###1"
        );
    }

    #[test]
    fn different_salt_changes_digest() {
        let payload = encode(&json!({"merchantId": "M1", "amount": 100})).unwrap();
        let signature = sign(payload.as_str(), PAY_PATH, &salt("other-salt"));

        assert_eq!(
            signature.digest(),
            "b611916cb6b8632a013441a2246c05067bb54e523339a999d3ae9e195aba08eb"
        );
    }

    #[test]
    fn salt_index_is_appended() {
        let rotated = GatewaySecret::new("test-salt", 3, "M1");
        let signature = sign("abc", PAY_PATH, &rotated);

        assert!(signature.as_str().ends_with("###3"));
        assert_eq!(signature.digest(), sign("abc", PAY_PATH, &salt("test-salt")).digest());
    }

    #[test]
    fn digest_is_lowercase_hex() {
        let signature = sign("payload", PAY_PATH, &salt("k"));
        assert_eq!(signature.digest().len(), 64);
        assert!(signature
            .digest()
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn hex_encode_pads_bytes() {
        assert_eq!(hex_encode(&[0x00, 0x0f, 0xab]), "000fab");
    }

    proptest! {
        #[test]
        fn signing_is_deterministic(payload in "[A-Za-z0-9+/=]{0,64}", key in "[a-z0-9-]{1,32}") {
            let secret = salt(&key);
            prop_assert_eq!(sign(&payload, PAY_PATH, &secret), sign(&payload, PAY_PATH, &secret));
        }

        #[test]
        fn payload_change_changes_signature(a in "[A-Za-z0-9]{1,32}", b in "[A-Za-z0-9]{1,32}") {
            prop_assume!(a != b);
            let secret = salt("test-salt");
            prop_assert_ne!(sign(&a, PAY_PATH, &secret), sign(&b, PAY_PATH, &secret));
        }

        #[test]
        fn path_change_changes_signature(txn in "[A-Z0-9]{1,16}") {
            let secret = salt("test-salt");
            let status_path = format!("/pg/v1/status/M1/{}", txn);
            prop_assert_ne!(sign("payload", PAY_PATH, &secret), sign("payload", &status_path, &secret));
        }

        #[test]
        fn key_change_changes_signature(a in "[a-z0-9]{1,32}", b in "[a-z0-9]{1,32}") {
            prop_assume!(a != b);
            prop_assert_ne!(sign("payload", PAY_PATH, &salt(&a)), sign("payload", PAY_PATH, &salt(&b)));
        }
    }
}
