//! Browser push subscription model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::id::UserId;

/// One browser's registered ability to receive push messages.
///
/// `(user_id, endpoint)` is unique: a browser may be registered once per
/// user, and re-registration upserts rather than duplicates. Rows are
/// deleted either by explicit unsubscription or when the dispatch
/// coordinator observes a permanent delivery failure for the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Subscription {
    /// Unique subscription identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: UserId,
    /// Transport-assigned delivery URL; the natural key together with `user_id`.
    pub endpoint: String,
    /// Client public key (base64url, uncompressed P-256 point).
    pub p256dh_key: String,
    /// Client authentication secret (base64url, 16 bytes).
    pub auth_key: String,
    /// When the subscription was registered. Informational only.
    pub created_at: DateTime<Utc>,
}

/// Insert/upsert payload for a subscription registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubscription {
    /// The owning user.
    pub user_id: UserId,
    /// Transport-assigned delivery URL.
    pub endpoint: String,
    /// Client public key (base64url).
    pub p256dh_key: String,
    /// Client authentication secret (base64url).
    pub auth_key: String,
}
