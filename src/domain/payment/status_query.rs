//! Transaction status lookup key.

use super::GatewayError;

/// Path prefix of the status endpoint.
const STATUS_PATH_PREFIX: &str = "/pg/v1/status";

/// Identifies a previously submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStatusQuery {
    merchant_id: String,
    transaction_id: String,
}

impl TransactionStatusQuery {
    /// Validates both identifiers as single path segments.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidQuery` if either value is empty or
    /// contains anything other than ASCII letters, digits, `_` and `-`.
    pub fn new(
        merchant_id: impl Into<String>,
        transaction_id: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let merchant_id = merchant_id.into();
        let transaction_id = transaction_id.into();
        validate_segment("merchant id", &merchant_id)?;
        validate_segment("transaction id", &transaction_id)?;
        Ok(Self {
            merchant_id,
            transaction_id,
        })
    }

    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// `/pg/v1/status/{merchantId}/{transactionId}`
    pub fn gateway_path(&self) -> String {
        format!(
            "{}/{}/{}",
            STATUS_PATH_PREFIX, self.merchant_id, self.transaction_id
        )
    }
}

fn validate_segment(field: &str, value: &str) -> Result<(), GatewayError> {
    if value.trim().is_empty() {
        return Err(GatewayError::invalid_query(format!("{} cannot be empty", field)));
    }
    // The URL on the wire must carry the signed path byte for byte.
    if !value.bytes().all(is_id_byte) {
        return Err(GatewayError::invalid_query(format!(
            "{} may only contain letters, digits, '_' and '-'",
            field
        )));
    }
    Ok(())
}

fn is_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}
