//! Subscription store trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UserId;
use crate::types::subscription::{NewSubscription, Subscription};

/// Durable mapping from user identity to the set of active push
/// subscriptions.
///
/// The dispatch coordinator is storage-agnostic: it reads once
/// (`list_by_user`) and writes once (`delete_many`) per request, so the
/// store needs no locking discipline beyond what the underlying
/// persistence layer provides natively.
#[async_trait]
pub trait SubscriptionStore: Send + Sync + 'static {
    /// Return all active subscriptions for the user.
    ///
    /// An empty vector is a valid result, never an error.
    async fn list_by_user(&self, user_id: UserId) -> AppResult<Vec<Subscription>>;

    /// Insert or replace the row matching `(user_id, endpoint)`. Idempotent.
    async fn upsert(&self, subscription: &NewSubscription) -> AppResult<Subscription>;

    /// Delete all subscriptions whose endpoint is in the set, regardless of
    /// owning user. Endpoints that no longer exist are skipped, not errors.
    /// Returns the number of rows deleted.
    async fn delete_many(&self, endpoints: &[String]) -> AppResult<u64>;
}
