//! Fan-out/fan-in dispatch of one status change to a user's subscriptions.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use futures::stream;
use tracing::{info, warn};

use luciole_core::config::push::PushConfig;
use luciole_core::result::AppResult;
use luciole_core::traits::SubscriptionStore;
use luciole_core::types::dispatch::{DeliveryOutcome, DeliveryStatus, DispatchResult};
use luciole_core::types::id::{SignalementId, UserId};
use luciole_core::types::notification::SignalementStatus;
use luciole_core::types::subscription::Subscription;

use crate::client::DeliveryClient;
use crate::content;

/// Turns "notify this user that a signalement changed status" into a fully
/// accounted-for batch of delivery attempts plus one batched prune.
///
/// The store is read once (list) and written once (batched delete) per
/// dispatch; individual rows are never mutated mid-batch.
pub struct DispatchCoordinator {
    store: Arc<dyn SubscriptionStore>,
    client: DeliveryClient,
    config: PushConfig,
}

impl DispatchCoordinator {
    /// Create a coordinator over a store and a delivery client.
    pub fn new(store: Arc<dyn SubscriptionStore>, client: DeliveryClient, config: PushConfig) -> Self {
        Self {
            store,
            client,
            config,
        }
    }

    /// Convenience constructor deriving the client's timeout and the
    /// concurrency cap from configuration.
    pub fn from_config(
        store: Arc<dyn SubscriptionStore>,
        transport: Arc<dyn crate::transport::PushTransport>,
        config: PushConfig,
    ) -> Self {
        let client = DeliveryClient::new(
            transport,
            Duration::from_secs(config.delivery_timeout_seconds),
        );
        Self::new(store, client, config)
    }

    /// Deliver the status-change notification to every subscription of the
    /// user, prune permanently dead endpoints, and return the aggregate.
    pub async fn dispatch(
        &self,
        user_id: UserId,
        signalement_id: SignalementId,
        status: SignalementStatus,
    ) -> AppResult<DispatchResult> {
        let subscriptions = self.store.list_by_user(user_id).await?;
        if subscriptions.is_empty() {
            // Valid, non-error outcome: the user has no registered channels.
            return Ok(DispatchResult::default());
        }

        let subscriptions = dedup_by_endpoint(subscriptions);

        // Built once; pure given a parsed status. Shared by the attempt
        // futures, which must own their captures to stay spawn-friendly.
        let payload: Arc<[u8]> = serde_json::to_vec(&content::build_payload(
            signalement_id,
            status,
            &self.config,
        ))?
        .into();

        let concurrency = self.config.max_concurrent.max(1);
        let outcomes: Vec<DeliveryOutcome> = stream::iter(subscriptions)
            .map(|sub| {
                let client = self.client.clone();
                let payload = Arc::clone(&payload);
                async move { client.deliver(&sub, &payload).await }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let mut sent_count = 0u64;
        let mut prune_set: HashSet<&str> = HashSet::new();

        for outcome in &outcomes {
            match outcome.status {
                DeliveryStatus::Delivered => sent_count += 1,
                DeliveryStatus::PermanentFailure => {
                    warn!(
                        endpoint = %outcome.endpoint,
                        detail = outcome.detail.as_deref().unwrap_or(""),
                        "Subscription permanently dead, pruning"
                    );
                    prune_set.insert(outcome.endpoint.as_str());
                }
                DeliveryStatus::TransientFailure => {
                    warn!(
                        endpoint = %outcome.endpoint,
                        detail = outcome.detail.as_deref().unwrap_or(""),
                        "Delivery failed transiently, subscription retained"
                    );
                }
            }
        }

        let pruned_count = prune_set.len() as u64;
        if !prune_set.is_empty() {
            let endpoints: Vec<String> = prune_set.iter().map(|e| e.to_string()).collect();
            self.store.delete_many(&endpoints).await?;
        }

        info!(
            %user_id,
            %signalement_id,
            attempts = outcomes.len(),
            sent = sent_count,
            pruned = pruned_count,
            "Dispatch complete"
        );

        Ok(DispatchResult {
            sent_count,
            pruned_count,
            attempted_count: outcomes.len() as u64,
        })
    }
}

/// Drop duplicate endpoints within one user's set, keeping the first.
///
/// The store's uniqueness constraint should make duplicates impossible,
/// but two attempts to the same endpoint would waste a delivery slot and
/// double-count, so the coordinator tolerates them anyway.
fn dedup_by_endpoint(subscriptions: Vec<Subscription>) -> Vec<Subscription> {
    let mut seen: HashSet<String> = HashSet::with_capacity(subscriptions.len());
    subscriptions
        .into_iter()
        .filter(|sub| seen.insert(sub.endpoint.clone()))
        .collect()
}
