//! Per-attempt delivery and outcome classification.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use luciole_core::types::dispatch::DeliveryOutcome;
use luciole_core::types::subscription::Subscription;

use crate::transport::{PushTransport, TransportResponse};

/// HTTP signals that mean the channel no longer exists.
const STATUS_NOT_FOUND: u16 = 404;
const STATUS_GONE: u16 = 410;

/// Wraps the push transport and turns every attempt into a
/// [`DeliveryOutcome`].
///
/// `deliver` never returns an error: transport failures of any kind are
/// caught and classified, so one failing subscription cannot abort a
/// batch. There is no retry here; a transient failure is simply left for
/// a future notification attempt.
#[derive(Clone)]
pub struct DeliveryClient {
    transport: Arc<dyn PushTransport>,
    attempt_timeout: Duration,
}

impl DeliveryClient {
    /// Create a client with a per-attempt timeout.
    pub fn new(transport: Arc<dyn PushTransport>, attempt_timeout: Duration) -> Self {
        Self {
            transport,
            attempt_timeout,
        }
    }

    /// Attempt one delivery and classify the result.
    ///
    /// Classification policy: the standardized "gone"/"not found" signals
    /// are permanent; success is delivered; everything else — timeout,
    /// rate limit, server error, network error — is transient.
    pub async fn deliver(&self, subscription: &Subscription, payload: &[u8]) -> DeliveryOutcome {
        let attempt = self.transport.push(subscription, payload);

        let outcome = match tokio::time::timeout(self.attempt_timeout, attempt).await {
            Err(_) => DeliveryOutcome::transient(
                &subscription.endpoint,
                format!("attempt timed out after {:?}", self.attempt_timeout),
            ),
            Ok(Err(e)) => DeliveryOutcome::transient(&subscription.endpoint, e.to_string()),
            Ok(Ok(response)) => classify(&subscription.endpoint, &response),
        };

        debug!(
            endpoint = %subscription.endpoint,
            status = ?outcome.status,
            "Delivery attempt finished"
        );
        outcome
    }
}

fn classify(endpoint: &str, response: &TransportResponse) -> DeliveryOutcome {
    if response.is_success() {
        return DeliveryOutcome::delivered(endpoint);
    }

    let detail = format!(
        "push service returned {}{}",
        response.status,
        response
            .detail
            .as_deref()
            .map(|d| format!(": {d}"))
            .unwrap_or_default()
    );

    match response.status {
        STATUS_NOT_FOUND | STATUS_GONE => DeliveryOutcome::permanent(endpoint, detail),
        _ => DeliveryOutcome::transient(endpoint, detail),
    }
}
