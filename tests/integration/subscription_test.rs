//! Integration tests for subscription registration and removal.

mod helpers;

use axum::http::StatusCode;

use helpers::{ScriptedTransport, TestApp};
use luciole_core::types::id::UserId;

fn subscribe_body(user_id: UserId, endpoint: &str, p256dh: &str, auth: &str) -> serde_json::Value {
    serde_json::json!({
        "user_id": user_id.to_string(),
        "endpoint": endpoint,
        "keys": { "p256dh": p256dh, "auth": auth },
    })
}

#[tokio::test]
async fn test_subscribe_registers_endpoint() {
    let app = TestApp::new(ScriptedTransport::default());
    let user = UserId::new();

    let response = app
        .request(
            "POST",
            "/api/push/subscriptions",
            Some(subscribe_body(user, "https://push.example/a", "key", "secret")),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        app.endpoints_for(user).await,
        vec!["https://push.example/a".to_string()]
    );
}

#[tokio::test]
async fn test_resubscribe_upserts_instead_of_duplicating() {
    let app = TestApp::new(ScriptedTransport::default());
    let user = UserId::new();

    for keys in [("key1", "auth1"), ("key2", "auth2")] {
        let response = app
            .request(
                "POST",
                "/api/push/subscriptions",
                Some(subscribe_body(user, "https://push.example/a", keys.0, keys.1)),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    use luciole_core::traits::SubscriptionStore;
    let subs = app.store.list_by_user(user).await.unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].p256dh_key, "key2");
    assert_eq!(subs[0].auth_key, "auth2");
}

#[tokio::test]
async fn test_subscribe_missing_keys_rejected() {
    let app = TestApp::new(ScriptedTransport::default());

    let response = app
        .request(
            "POST",
            "/api/push/subscriptions",
            Some(subscribe_body(UserId::new(), "https://push.example/a", "", "auth")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unsubscribe_removes_endpoint() {
    let app = TestApp::new(ScriptedTransport::default());
    let user = UserId::new();
    app.seed_subscription(user, "https://push.example/a").await;

    let response = app
        .request(
            "DELETE",
            "/api/push/subscriptions",
            Some(serde_json::json!({ "endpoint": "https://push.example/a" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(app.endpoints_for(user).await.is_empty());
}

#[tokio::test]
async fn test_vapid_public_key_exposed() {
    let app = TestApp::new(ScriptedTransport::default());

    let response = app.request("GET", "/api/push/vapid-public-key", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!({ "public_key": "test-public-key" })
    );
}

#[tokio::test]
async fn test_health_reports_ok() {
    let app = TestApp::new(ScriptedTransport::default());

    let response = app.request("GET", "/api/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
