//! Mock gateway transport for testing.
//!
//! Provides a scripted implementation of `GatewayTransport` for unit and
//! integration tests. Supports:
//! - Queued responses and transport errors
//! - A fallback response once the queue is drained
//! - Request capture for URL/header/body assertions

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{GatewayRequest, GatewayTransport, TransportError, TransportResponse};

/// Mock transport for testing.
///
/// # Example
///
/// ```
/// use paygate::adapters::phonepe::MockGatewayTransport;
///
/// let mock = MockGatewayTransport::new();
/// mock.respond_with(200, r#"{"success":true,"code":"PAYMENT_INITIATED"}"#);
/// assert_eq!(mock.call_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockGatewayTransport {
    /// Inner state (shared so clones observe the same calls).
    inner: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    /// Scripted replies, consumed in order.
    queue: VecDeque<Result<TransportResponse, TransportError>>,

    /// Reply used when the queue is empty.
    fallback: Option<TransportResponse>,

    /// Every request received.
    requests: Vec<GatewayRequest>,
}

impl MockGatewayTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that answers every call with the same reply.
    pub fn always(status: u16, body: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.state().fallback = Some(TransportResponse::new(status, body));
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Queue a reply.
    pub fn respond_with(&self, status: u16, body: impl Into<String>) {
        self.state()
            .queue
            .push_back(Ok(TransportResponse::new(status, body)));
    }

    /// Queue a transport failure.
    pub fn fail_with(&self, error: TransportError) {
        self.state().queue.push_back(Err(error));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// All requests received so far.
    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.state().requests.clone()
    }

    pub fn last_request(&self) -> Option<GatewayRequest> {
        self.state().requests.last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl GatewayTransport for MockGatewayTransport {
    async fn send(&self, request: GatewayRequest) -> Result<TransportResponse, TransportError> {
        let mut state = self.state();
        state.requests.push(request);

        match state.queue.pop_front() {
            Some(reply) => reply,
            None => state
                .fallback
                .clone()
                .ok_or_else(|| TransportError::other("no mock response configured")),
        }
    }
}
