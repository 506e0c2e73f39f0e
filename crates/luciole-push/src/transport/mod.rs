//! Push transport boundary.
//!
//! The dispatch layers never inspect transport-specific details beyond the
//! status-code signal in [`TransportResponse`]; everything HTTP-, VAPID-,
//! and encryption-shaped lives below this trait.

pub mod crypto;
pub mod http;
pub mod vapid;

use async_trait::async_trait;

use luciole_core::result::AppResult;
use luciole_core::types::subscription::Subscription;

/// Status-code-like signal reported by the push service for one attempt.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code returned by the push service.
    pub status: u16,
    /// Truncated response body for failed attempts, if available.
    pub detail: Option<String>,
}

impl TransportResponse {
    /// Whether the push service accepted the message.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One delivery attempt against one subscription endpoint.
///
/// Implementations perform network I/O and may fail with transport-level
/// errors (connection refused, TLS failure, invalid key material); the
/// delivery client converts both error and response into a
/// [`DeliveryOutcome`](luciole_core::types::DeliveryOutcome).
#[async_trait]
pub trait PushTransport: Send + Sync + 'static {
    /// POST the encrypted payload to the subscription's endpoint and
    /// report the push service's response.
    async fn push(&self, subscription: &Subscription, payload: &[u8])
    -> AppResult<TransportResponse>;
}
