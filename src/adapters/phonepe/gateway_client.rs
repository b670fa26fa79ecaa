//! Gateway client.
//!
//! Orchestrates credential resolution, encoding and signing, then sends the
//! request through a [`GatewayTransport`] and normalizes the reply.
//!
//! # Operations
//!
//! | Operation | Method | Endpoint | Signed material |
//! |-----------|--------|----------|-----------------|
//! | `submit_payment` | POST | `{base}/apis/hermes/pg/v1/pay` | payload + `/pg/v1/pay` + salt |
//! | `submit_test_payment` | POST | sandbox `pay_url` | payload + `/pg/v1/pay` + salt |
//! | `check_status` | GET | `{base}/pg/v1/status/{mid}/{txn}` | path + salt |
//!
//! Structural problems (unencodable body, missing credentials, malformed
//! status query) are returned as `Err` before any request is sent. Every
//! network result, good or bad, is an `Ok(GatewayOutcome)`.

use std::sync::Arc;

use serde::Serialize;

use super::ReqwestTransport;
use crate::adapters::credentials::{EnvCredentialResolver, StaticCredentialResolver};
use crate::config::{AppConfig, HttpConfig};
use crate::domain::payment::{
    encode, sign, sign_path, GatewayError, GatewayOutcome, GatewayResponse, ProfileId,
    ResolvedProfile, TransactionStatusQuery, TransportFailure, TransportFailureKind, PAY_ENDPOINT,
    PAY_PATH,
};
use crate::ports::{CredentialResolver, GatewayRequest, GatewayTransport, TransportResponse};

const HEADER_CONTENT_TYPE: &str = "Content-Type";
const HEADER_ACCEPT: &str = "Accept";
const HEADER_VERIFY: &str = "X-VERIFY";
const HEADER_MERCHANT_ID: &str = "X-MERCHANT-ID";
const APPLICATION_JSON: &str = "application/json";

const OPERATION_PAY: &str = "pay";
const OPERATION_STATUS: &str = "status";

/// Envelope of the pay endpoint body.
#[derive(Serialize)]
struct PayEnvelope<'a> {
    request: &'a str,
}

/// Signed-request client for the payment gateway.
///
/// Stateless between calls; share it behind an `Arc` across tasks.
pub struct GatewayClient {
    transport: Arc<dyn GatewayTransport>,
    resolver: Arc<dyn CredentialResolver>,
}

impl GatewayClient {
    pub fn new(
        transport: Arc<dyn GatewayTransport>,
        resolver: Arc<dyn CredentialResolver>,
    ) -> Self {
        Self {
            transport,
            resolver,
        }
    }

    /// Client over a configuration loaded once at startup.
    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        let transport = ReqwestTransport::new(config.http.clone())?;
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(StaticCredentialResolver::from_config(config)),
        ))
    }

    /// Client that re-reads profile credentials from the environment on
    /// every call.
    pub fn from_env(http: HttpConfig) -> Result<Self, GatewayError> {
        let transport = ReqwestTransport::new(http)?;
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(EnvCredentialResolver::new()),
        ))
    }

    /// Submit a payment against `profile`.
    ///
    /// # Errors
    ///
    /// - `GatewayError::Configuration` if the profile is the sandbox (use
    ///   [`submit_test_payment`](Self::submit_test_payment)) or lacks credentials
    /// - `GatewayError::Encoding` if `body` cannot be serialized
    pub async fn submit_payment<T>(
        &self,
        body: &T,
        profile: &ProfileId,
    ) -> Result<GatewayOutcome, GatewayError>
    where
        T: Serialize + ?Sized,
    {
        if profile.is_sandbox() {
            return Err(GatewayError::configuration(
                profile,
                "sandbox profile is reserved for test payments",
            ));
        }

        let resolved = self.resolver.resolve(profile)?;
        let url = resolved.endpoint(PAY_ENDPOINT);
        self.pay(body, &resolved, url).await
    }

    /// Submit a payment against the sandbox profile.
    ///
    /// Posts to the sandbox `pay_url` when configured, otherwise to the
    /// sandbox base URL's pay endpoint.
    pub async fn submit_test_payment<T>(&self, body: &T) -> Result<GatewayOutcome, GatewayError>
    where
        T: Serialize + ?Sized,
    {
        let resolved = self.resolver.resolve(&ProfileId::sandbox())?;
        let url = resolved
            .pay_url
            .clone()
            .unwrap_or_else(|| resolved.endpoint(PAY_ENDPOINT));
        self.pay(body, &resolved, url).await
    }

    /// Fetch the live status of a transaction.
    ///
    /// # Errors
    ///
    /// - `GatewayError::InvalidQuery` if either id is empty or not a single
    ///   path segment
    /// - `GatewayError::Configuration` if the profile lacks credentials
    pub async fn check_status(
        &self,
        merchant_id: &str,
        transaction_id: &str,
        profile: &ProfileId,
    ) -> Result<GatewayOutcome, GatewayError> {
        let query = TransactionStatusQuery::new(merchant_id, transaction_id)?;
        let resolved = self.resolver.resolve(profile)?;

        let path = query.gateway_path();
        let signature = sign_path(&path, &resolved.secret);
        tracing::debug!(
            profile = %profile,
            transaction_id = %query.transaction_id(),
            "Built status request"
        );

        let request = GatewayRequest::get(resolved.endpoint(&path))
            .with_header(HEADER_MERCHANT_ID, query.merchant_id())
            .with_header(HEADER_VERIFY, signature.as_str());

        Ok(self.dispatch(profile, OPERATION_STATUS, request).await)
    }

    async fn pay<T>(
        &self,
        body: &T,
        resolved: &ResolvedProfile,
        url: String,
    ) -> Result<GatewayOutcome, GatewayError>
    where
        T: Serialize + ?Sized,
    {
        let payload = encode(body)?;
        let signature = sign(payload.as_str(), PAY_PATH, &resolved.secret);
        let envelope = serde_json::to_string(&PayEnvelope {
            request: payload.as_str(),
        })?;

        let request = GatewayRequest::post(url, envelope)
            .with_header(HEADER_CONTENT_TYPE, APPLICATION_JSON)
            .with_header(HEADER_ACCEPT, APPLICATION_JSON)
            .with_header(HEADER_VERIFY, signature.as_str());

        Ok(self.dispatch(&resolved.id, OPERATION_PAY, request).await)
    }

    /// Sends `request` and normalizes the reply. Log events never include the
    /// URL.
    async fn dispatch(
        &self,
        profile: &ProfileId,
        operation: &'static str,
        request: GatewayRequest,
    ) -> GatewayOutcome {
        let method = request.method;

        tracing::info!(profile = %profile, %method, operation, "Dispatching gateway request");

        let outcome = match self.transport.send(request).await {
            Ok(response) => normalize(response),
            Err(error) => GatewayOutcome::Failed(error.into()),
        };

        match &outcome {
            GatewayOutcome::Accepted(response) => tracing::info!(
                profile = %profile,
                operation,
                status = response.status,
                code = response.code().unwrap_or_default(),
                "Gateway accepted request"
            ),
            GatewayOutcome::Rejected(response) => tracing::warn!(
                profile = %profile,
                operation,
                status = response.status,
                code = response.code().unwrap_or_default(),
                "Gateway rejected request"
            ),
            GatewayOutcome::Failed(failure) => tracing::warn!(
                profile = %profile,
                operation,
                kind = %failure.kind,
                error = %failure.message,
                "Gateway request failed"
            ),
        }

        outcome
    }
}

impl std::fmt::Debug for GatewayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayClient").finish_non_exhaustive()
    }
}

/// Map a raw reply onto the outcome taxonomy.
fn normalize(response: TransportResponse) -> GatewayOutcome {
    if response.is_success() {
        return GatewayOutcome::Accepted(GatewayResponse::from_text(
            response.status,
            &response.body,
        ));
    }

    if response.body.trim().is_empty() {
        return GatewayOutcome::Failed(TransportFailure::new(
            TransportFailureKind::EmptyResponse {
                status: response.status,
            },
            format!("Gateway returned status {} with an empty body", response.status),
        ));
    }

    GatewayOutcome::Rejected(GatewayResponse::from_text(response.status, &response.body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::credentials::StaticCredentialResolver;
    use crate::adapters::phonepe::MockGatewayTransport;
    use crate::config::ProfileConfig;
    use crate::ports::{HttpMethod, TransportError};
    use serde_json::json;
    use std::collections::HashMap;

    const SANDBOX_PAY_URL: &str = "https://api-preprod.phonepe.com/apis/pg-sandbox/pg/v1/pay";

    fn resolver() -> StaticCredentialResolver {
        StaticCredentialResolver::default()
            .with_profile(
                ProfileId::production(),
                ProfileConfig::new("prod-salt", "PRODM", "https://api.phonepe.com"),
            )
            .with_profile(
                ProfileId::sandbox(),
                ProfileConfig::new("test-salt", "TESTM", "https://api-preprod.phonepe.com")
                    .with_pay_url(SANDBOX_PAY_URL),
            )
    }

    fn client(mock: &MockGatewayTransport) -> GatewayClient {
        GatewayClient::new(Arc::new(mock.clone()), Arc::new(resolver()))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // submit_payment
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn submit_payment_sends_signed_envelope() {
        let mock = MockGatewayTransport::always(200, r#"{"success":true,"code":"PAYMENT_INITIATED"}"#);
        let body = json!({"merchantId": "PRODM", "amount": 100});

        let outcome = client(&mock)
            .submit_payment(&body, &ProfileId::production())
            .await
            .unwrap();

        assert!(outcome.is_accepted());
        let request = mock.last_request().unwrap();
        let payload = encode(&body).unwrap();
        let secret = resolver().resolve(&ProfileId::production()).unwrap().secret;

        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://api.phonepe.com/apis/hermes/pg/v1/pay");
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(
            request.header("X-VERIFY"),
            Some(sign(payload.as_str(), "/pg/v1/pay", &secret).as_str())
        );
        let sent: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, json!({"request": payload.as_str()}));
    }

    #[tokio::test]
    async fn submit_payment_rejects_sandbox_profile() {
        let mock = MockGatewayTransport::always(200, "{}");
        let err = client(&mock)
            .submit_payment(&json!({}), &ProfileId::sandbox())
            .await
            .unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn encoding_failure_sends_nothing() {
        let mock = MockGatewayTransport::always(200, "{}");
        let mut body = HashMap::new();
        body.insert((1, 2), "tuple keys are not JSON");

        let err = client(&mock)
            .submit_payment(&body, &ProfileId::production())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Encoding(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_profile_sends_nothing() {
        let mock = MockGatewayTransport::always(200, "{}");
        let err = client(&mock)
            .submit_payment(&json!({}), &ProfileId::new("tenant-x"))
            .await
            .unwrap_err();

        assert!(err.is_configuration());
        assert_eq!(mock.call_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // submit_test_payment
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn test_payment_uses_sandbox_url_and_salt() {
        let mock = MockGatewayTransport::always(200, "{}");
        let body = json!({"merchantId": "TESTM", "amount": 100});

        client(&mock).submit_test_payment(&body).await.unwrap();

        let request = mock.last_request().unwrap();
        let payload = encode(&body).unwrap();
        let sandbox = resolver().resolve(&ProfileId::sandbox()).unwrap().secret;

        assert_eq!(request.url, SANDBOX_PAY_URL);
        assert_eq!(
            request.header("X-VERIFY"),
            Some(sign(payload.as_str(), "/pg/v1/pay", &sandbox).as_str())
        );
    }

    #[tokio::test]
    async fn test_payment_falls_back_to_sandbox_base_url() {
        let mock = MockGatewayTransport::always(200, "{}");
        let resolver = StaticCredentialResolver::default().with_profile(
            ProfileId::sandbox(),
            ProfileConfig::new("test-salt", "TESTM", "https://sandbox.example.com"),
        );
        let client = GatewayClient::new(Arc::new(mock.clone()), Arc::new(resolver));

        client.submit_test_payment(&json!({})).await.unwrap();

        assert_eq!(
            mock.last_request().unwrap().url,
            "https://sandbox.example.com/apis/hermes/pg/v1/pay"
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // check_status
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn check_status_signs_raw_path() {
        let mock = MockGatewayTransport::always(200, r#"{"success":true,"code":"PAYMENT_SUCCESS"}"#);
        let resolver = StaticCredentialResolver::default().with_profile(
            ProfileId::production(),
            ProfileConfig::new("test-salt", "M1", "https://api.phonepe.com"),
        );
        let client = GatewayClient::new(Arc::new(mock.clone()), Arc::new(resolver));

        let outcome = client
            .check_status("M1", "T123", &ProfileId::production())
            .await
            .unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(outcome.response().unwrap().code(), Some("PAYMENT_SUCCESS"));
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, "https://api.phonepe.com/pg/v1/status/M1/T123");
        assert_eq!(request.header("X-MERCHANT-ID"), Some("M1"));
        assert_eq!(
            request.header("X-VERIFY"),
            Some("3673473841a334ace2d1eb9d1a31acba3ffa05ed3e40a89cd453eda5b7418f2e###1")
        );
        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.header("Content-Type"), None);
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn check_status_rejects_bad_ids_before_io() {
        let mock = MockGatewayTransport::always(200, "{}");
        let err = client(&mock)
            .check_status("M1", "", &ProfileId::production())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidQuery(_)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn check_status_rejects_dot_segments_before_io() {
        let mock = MockGatewayTransport::always(200, "{}");
        let client = client(&mock);

        for (merchant_id, transaction_id) in [("M1", ".."), ("..", "pay"), ("M1", "T%2F1")] {
            let err = client
                .check_status(merchant_id, transaction_id, &ProfileId::production())
                .await
                .unwrap_err();
            assert!(matches!(err, GatewayError::InvalidQuery(_)));
        }
        assert_eq!(mock.call_count(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Normalization
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn gateway_error_body_passes_through() {
        let mock = MockGatewayTransport::new();
        mock.respond_with(400, r#"{"success":false,"code":"BAD_REQUEST","message":"Please check the inputs you have provided."}"#);

        let outcome = client(&mock)
            .submit_payment(&json!({"amount": 1}), &ProfileId::production())
            .await
            .unwrap();

        match outcome {
            GatewayOutcome::Rejected(response) => {
                assert_eq!(response.status, 400);
                assert_eq!(response.code(), Some("BAD_REQUEST"));
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn connection_failure_is_a_value() {
        let mock = MockGatewayTransport::new();
        mock.fail_with(TransportError::connect("connection refused"));

        let outcome = client(&mock)
            .check_status("PRODM", "T1", &ProfileId::production())
            .await
            .unwrap();

        match outcome {
            GatewayOutcome::Failed(failure) => {
                assert_eq!(failure.kind, TransportFailureKind::Connect);
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn normalize_empty_error_body() {
        let outcome = normalize(TransportResponse::new(503, "  "));
        assert_eq!(
            outcome,
            GatewayOutcome::Failed(TransportFailure::new(
                TransportFailureKind::EmptyResponse { status: 503 },
                "Gateway returned status 503 with an empty body",
            ))
        );
    }

    #[test]
    fn normalize_redirect_is_not_accepted() {
        let outcome = normalize(TransportResponse::new(302, ""));
        assert!(!outcome.is_accepted());
        assert_eq!(outcome.status(), Some(302));
    }

    #[test]
    fn normalize_empty_success_body_is_accepted() {
        let outcome = normalize(TransportResponse::new(204, ""));
        assert!(outcome.is_accepted());
    }
}
