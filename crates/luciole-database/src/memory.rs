//! In-memory subscription store for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use luciole_core::result::AppResult;
use luciole_core::traits::SubscriptionStore;
use luciole_core::types::id::UserId;
use luciole_core::types::subscription::{NewSubscription, Subscription};

/// Non-durable [`SubscriptionStore`] keyed by `(user_id, endpoint)`.
///
/// Mirrors the uniqueness semantics of the Postgres repository so the
/// dispatch coordinator can be exercised without a database.
#[derive(Debug, Default)]
pub struct MemorySubscriptionStore {
    rows: RwLock<HashMap<(UserId, String), Subscription>>,
}

impl MemorySubscriptionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows across all users.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether the store holds no rows.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl SubscriptionStore for MemorySubscriptionStore {
    async fn list_by_user(&self, user_id: UserId) -> AppResult<Vec<Subscription>> {
        let rows = self.rows.read().await;
        let mut subs: Vec<Subscription> = rows
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        subs.sort_by_key(|s| s.created_at);
        Ok(subs)
    }

    async fn upsert(&self, subscription: &NewSubscription) -> AppResult<Subscription> {
        let mut rows = self.rows.write().await;
        let key = (subscription.user_id, subscription.endpoint.clone());

        let row = match rows.get(&key) {
            Some(existing) => Subscription {
                p256dh_key: subscription.p256dh_key.clone(),
                auth_key: subscription.auth_key.clone(),
                ..existing.clone()
            },
            None => Subscription {
                id: Uuid::new_v4(),
                user_id: subscription.user_id,
                endpoint: subscription.endpoint.clone(),
                p256dh_key: subscription.p256dh_key.clone(),
                auth_key: subscription.auth_key.clone(),
                created_at: Utc::now(),
            },
        };

        rows.insert(key, row.clone());
        Ok(row)
    }

    async fn delete_many(&self, endpoints: &[String]) -> AppResult<u64> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|(_, endpoint), _| !endpoints.contains(endpoint));
        Ok((before - rows.len()) as u64)
    }
}
