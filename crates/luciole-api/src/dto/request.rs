//! Request DTOs with validation.

use serde::{Deserialize, Serialize};

use luciole_core::error::AppError;
use luciole_core::result::AppResult;
use luciole_core::types::id::{SignalementId, UserId};
use luciole_core::types::notification::SignalementStatus;
use luciole_core::types::subscription::NewSubscription;

/// Inbound dispatch trigger body.
///
/// All fields are deserialized as optional so that presence can be
/// validated explicitly and any missing field rejected before the
/// store is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchRequest {
    /// Signalement whose status changed.
    pub signalement_id: Option<String>,
    /// Owner to notify.
    pub user_id: Option<String>,
    /// New status value.
    pub new_status: Option<String>,
}

impl DispatchRequest {
    /// Validate presence and shape of all three fields.
    ///
    /// Unknown status values fail closed here, before any store read.
    pub fn validate(&self) -> AppResult<(SignalementId, UserId, SignalementStatus)> {
        let (Some(signalement_id), Some(user_id), Some(new_status)) =
            (&self.signalement_id, &self.user_id, &self.new_status)
        else {
            return Err(AppError::validation("Missing fields"));
        };

        let signalement_id: SignalementId = signalement_id
            .parse()
            .map_err(|_| AppError::validation("Invalid signalement_id"))?;
        let user_id: UserId = user_id
            .parse()
            .map_err(|_| AppError::validation("Invalid user_id"))?;
        let status: SignalementStatus = new_status.parse()?;

        Ok((signalement_id, user_id, status))
    }
}

/// Browser subscription registration body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    /// Owning user.
    pub user_id: String,
    /// Transport-assigned endpoint URL.
    pub endpoint: String,
    /// Credential material from the browser's `PushSubscription`.
    pub keys: SubscriptionKeys,
}

/// The `keys` object of a browser `PushSubscription`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// Client ECDH public key (base64url, uncompressed P-256 point).
    pub p256dh: String,
    /// Client auth secret (base64url, 16 bytes).
    pub auth: String,
}

impl SubscribeRequest {
    /// Validate and convert into the store's insert type.
    pub fn into_new_subscription(self) -> AppResult<NewSubscription> {
        if self.endpoint.is_empty() || self.keys.p256dh.is_empty() || self.keys.auth.is_empty() {
            return Err(AppError::validation("Missing fields"));
        }
        let user_id: UserId = self
            .user_id
            .parse()
            .map_err(|_| AppError::validation("Invalid user_id"))?;

        Ok(NewSubscription {
            user_id,
            endpoint: self.endpoint,
            p256dh_key: self.keys.p256dh,
            auth_key: self.keys.auth,
        })
    }
}

/// Subscription removal body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsubscribeRequest {
    /// Endpoint URL to deregister.
    pub endpoint: String,
}
