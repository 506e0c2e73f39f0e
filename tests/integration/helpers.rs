//! Shared test helpers for integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use luciole_api::state::AppState;
use luciole_core::config::AppConfig;
use luciole_core::result::AppResult;
use luciole_core::types::id::UserId;
use luciole_core::types::subscription::{NewSubscription, Subscription};
use luciole_database::MemorySubscriptionStore;
use luciole_push::DispatchCoordinator;
use luciole_push::transport::{PushTransport, TransportResponse};

/// Scripted push transport for integration tests.
///
/// Endpoints map to a fixed response status or a simulated hang;
/// unscripted endpoints are accepted with 201.
#[derive(Default)]
pub struct ScriptedTransport {
    statuses: HashMap<String, u16>,
    hangs: Vec<String>,
}

impl ScriptedTransport {
    pub fn with_status(mut self, endpoint: &str, status: u16) -> Self {
        self.statuses.insert(endpoint.to_string(), status);
        self
    }

    pub fn with_hang(mut self, endpoint: &str) -> Self {
        self.hangs.push(endpoint.to_string());
        self
    }
}

#[async_trait]
impl PushTransport for ScriptedTransport {
    async fn push(&self, sub: &Subscription, _payload: &[u8]) -> AppResult<TransportResponse> {
        if self.hangs.contains(&sub.endpoint) {
            std::future::pending::<()>().await;
        }
        Ok(TransportResponse {
            status: self.statuses.get(&sub.endpoint).copied().unwrap_or(201),
            detail: None,
        })
    }
}

/// Test application context over an in-memory store.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Store handle for direct assertions.
    pub store: Arc<MemorySubscriptionStore>,
    /// Application config.
    pub config: Arc<AppConfig>,
}

impl TestApp {
    /// Create a test application with the given transport script.
    pub fn new(transport: ScriptedTransport) -> Self {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": {},
            "database": { "url": "postgres://unused" },
            "push": {
                "vapid_public_key": "test-public-key",
                "delivery_timeout_seconds": 1,
            },
            "logging": {},
        }))
        .expect("Failed to build test config");
        let config = Arc::new(config);

        let store = Arc::new(MemorySubscriptionStore::new());
        let dispatcher = Arc::new(DispatchCoordinator::from_config(
            Arc::clone(&store) as Arc<dyn luciole_core::traits::SubscriptionStore>,
            Arc::new(transport),
            config.push.clone(),
        ));

        let state = AppState::new(
            Arc::clone(&config),
            Arc::clone(&store) as Arc<dyn luciole_core::traits::SubscriptionStore>,
            dispatcher,
        );

        Self {
            router: luciole_api::build_app(state),
            store,
            config,
        }
    }

    /// Register a subscription directly in the store.
    pub async fn seed_subscription(&self, user_id: UserId, endpoint: &str) {
        use luciole_core::traits::SubscriptionStore;

        self.store
            .upsert(&NewSubscription {
                user_id,
                endpoint: endpoint.to_string(),
                p256dh_key: "p256dh".to_string(),
                auth_key: "auth".to_string(),
            })
            .await
            .expect("Failed to seed subscription");
    }

    /// Endpoints currently registered for a user.
    pub async fn endpoints_for(&self, user_id: UserId) -> Vec<String> {
        use luciole_core::traits::SubscriptionStore;

        self.store
            .list_by_user(user_id)
            .await
            .expect("Failed to list subscriptions")
            .into_iter()
            .map(|s| s.endpoint)
            .collect()
    }

    /// Make an HTTP request to the test app.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}
