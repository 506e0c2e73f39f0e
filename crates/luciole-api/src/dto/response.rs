//! Response DTOs.

use serde::{Deserialize, Serialize};

use luciole_core::types::dispatch::DispatchResult;

/// Aggregate dispatch response.
///
/// `failed` carries the pruned-endpoint count and is omitted when zero;
/// `message` is set only on the no-subscriptions short circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResponse {
    /// Number of deliveries that succeeded.
    pub sent: u64,
    /// Number of permanently dead subscriptions pruned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
    /// Informational note for the empty-subscription case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DispatchResponse {
    /// Response for a user with no registered subscriptions.
    pub fn no_subscriptions() -> Self {
        Self {
            sent: 0,
            failed: None,
            message: Some("No subscriptions found".to_string()),
        }
    }
}

impl From<DispatchResult> for DispatchResponse {
    fn from(result: DispatchResult) -> Self {
        Self {
            sent: result.sent_count,
            failed: (result.pruned_count > 0).then_some(result.pruned_count),
            message: None,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status string.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// VAPID public key response, consumed by browsers at subscribe time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VapidPublicKeyResponse {
    /// Application server public key (base64url).
    pub public_key: String,
}
