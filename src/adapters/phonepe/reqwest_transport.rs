//! `reqwest` implementation of [`GatewayTransport`].
//!
//! Enforces the configured request and connect timeouts and never follows
//! redirects. Error and 3xx statuses are returned as responses; only
//! failures to get a reply become errors.

use async_trait::async_trait;
use reqwest::{redirect, Client};

use crate::config::HttpConfig;
use crate::domain::payment::GatewayError;
use crate::ports::{GatewayRequest, GatewayTransport, HttpMethod, TransportError, TransportResponse};

/// HTTP transport backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: HttpConfig,
}

impl ReqwestTransport {
    /// Build a transport with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::HttpClient` if the timeouts are out of range or
    /// the TLS backend cannot be initialized.
    pub fn new(config: HttpConfig) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::HttpClient(e.to_string()))?;

        // A signed request goes to exactly one URL.
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| GatewayError::HttpClient(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn map_error(&self, error: reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::timeout(format!(
                "Gateway did not respond within {}s",
                self.config.timeout_secs
            ))
        } else if error.is_connect() {
            TransportError::connect(format!("Connection failed: {}", error))
        } else {
            TransportError::other(error.to_string())
        }
    }
}

#[async_trait]
impl GatewayTransport for ReqwestTransport {
    async fn send(&self, request: GatewayRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::TransportFailureKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Local server answering every request with a 302 back to itself.
    async fn redirecting_server() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let reply = format!(
                    "HTTP/1.1 302 Found\r\nLocation: http://{}/elsewhere\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                    addr
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), hits)
    }

    #[test]
    fn builds_with_default_config() {
        assert!(ReqwestTransport::new(HttpConfig::default()).is_ok());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = ReqwestTransport::new(HttpConfig {
            timeout_secs: 0,
            connect_timeout_secs: 10,
        })
        .unwrap_err();
        assert!(matches!(err, GatewayError::HttpClient(_)));
    }

    #[tokio::test]
    async fn redirects_are_returned_not_followed() {
        let (base, hits) = redirecting_server().await;
        let transport = ReqwestTransport::new(HttpConfig::default()).unwrap();

        let response = transport
            .send(
                GatewayRequest::get(format!("{}/pg/v1/status/M1/T1", base))
                    .with_header("X-VERIFY", "deadbeef###1"),
            )
            .await
            .unwrap();

        assert_eq!(response.status, 302);
        assert!(!response.is_success());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn connection_refused_is_connect_failure() {
        let transport = ReqwestTransport::new(HttpConfig {
            timeout_secs: 5,
            connect_timeout_secs: 2,
        })
        .unwrap();

        // Port 9 (discard) is closed on loopback in test environments.
        let err = transport
            .send(GatewayRequest::get("http://127.0.0.1:9/pg/v1/status/M1/T1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err.kind,
            TransportFailureKind::Connect | TransportFailureKind::Timeout
        ));
    }

    #[tokio::test]
    async fn invalid_url_is_other_failure() {
        let transport = ReqwestTransport::new(HttpConfig::default()).unwrap();
        let err = transport
            .send(GatewayRequest::get("not a url"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, TransportFailureKind::Other);
    }
}
