//! Push subscription repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use luciole_core::error::{AppError, ErrorKind};
use luciole_core::result::AppResult;
use luciole_core::traits::SubscriptionStore;
use luciole_core::types::id::UserId;
use luciole_core::types::subscription::{NewSubscription, Subscription};

/// Durable [`SubscriptionStore`] backed by the `push_subscriptions` table.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    async fn list_by_user(&self, user_id: UserId) -> AppResult<Vec<Subscription>> {
        sqlx::query_as::<_, Subscription>(
            "SELECT * FROM push_subscriptions WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list subscriptions", e)
        })
    }

    async fn upsert(&self, subscription: &NewSubscription) -> AppResult<Subscription> {
        sqlx::query_as::<_, Subscription>(
            "INSERT INTO push_subscriptions (user_id, endpoint, p256dh_key, auth_key) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (user_id, endpoint) DO UPDATE SET \
                 p256dh_key = EXCLUDED.p256dh_key, \
                 auth_key = EXCLUDED.auth_key \
             RETURNING *",
        )
        .bind(subscription.user_id)
        .bind(&subscription.endpoint)
        .bind(&subscription.p256dh_key)
        .bind(&subscription.auth_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert subscription", e)
        })
    }

    async fn delete_many(&self, endpoints: &[String]) -> AppResult<u64> {
        if endpoints.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM push_subscriptions WHERE endpoint = ANY($1)")
            .bind(endpoints)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete subscriptions", e)
            })?;

        Ok(result.rows_affected())
    }
}
