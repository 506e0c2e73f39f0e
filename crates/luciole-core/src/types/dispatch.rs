//! Per-attempt delivery outcomes and the aggregate dispatch result.

use serde::{Deserialize, Serialize};

/// Classification of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// The push service accepted the message.
    Delivered,
    /// A possibly-temporary condition; the subscription is retained.
    TransientFailure,
    /// The channel is defunct and will never succeed again; the
    /// subscription is pruned.
    PermanentFailure,
}

/// The result of one delivery attempt against one subscription.
///
/// Not persisted; consumed synchronously by the dispatch coordinator
/// within one request.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    /// The endpoint the attempt targeted.
    pub endpoint: String,
    /// Outcome classification.
    pub status: DeliveryStatus,
    /// Diagnostic detail, non-authoritative. Logged, never surfaced to callers.
    pub detail: Option<String>,
}

impl DeliveryOutcome {
    /// Create a delivered outcome.
    pub fn delivered(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: DeliveryStatus::Delivered,
            detail: None,
        }
    }

    /// Create a transient-failure outcome.
    pub fn transient(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: DeliveryStatus::TransientFailure,
            detail: Some(detail.into()),
        }
    }

    /// Create a permanent-failure outcome.
    pub fn permanent(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: DeliveryStatus::PermanentFailure,
            detail: Some(detail.into()),
        }
    }
}

/// Aggregate result of one dispatch request.
///
/// Callers only ever see these counts; per-endpoint outcomes are logged,
/// never surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Number of attempts classified as delivered.
    pub sent_count: u64,
    /// Number of distinct endpoints pruned for permanent failure.
    pub pruned_count: u64,
    /// Number of delivery attempts made. Zero means the user had no
    /// registered subscriptions; the boundary reports that case
    /// distinctly instead of as a silent `sent: 0`.
    pub attempted_count: u64,
}
