//! Integration tests for the dispatch trigger endpoint.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use helpers::{ScriptedTransport, TestApp};
use luciole_core::types::id::{SignalementId, UserId};

fn dispatch_body(signalement_id: SignalementId, user_id: UserId, status: &str) -> serde_json::Value {
    serde_json::json!({
        "signalement_id": signalement_id.to_string(),
        "user_id": user_id.to_string(),
        "new_status": status,
    })
}

#[tokio::test]
async fn test_missing_field_rejected_before_store_access() {
    let app = TestApp::new(ScriptedTransport::default());

    let response = app
        .request(
            "POST",
            "/api/notifications/dispatch",
            Some(serde_json::json!({
                "signalement_id": SignalementId::new().to_string(),
                "new_status": "approved",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, serde_json::json!({ "error": "Missing fields" }));
}

#[tokio::test]
async fn test_unknown_status_fails_closed() {
    let app = TestApp::new(ScriptedTransport::default());
    let user = UserId::new();
    app.seed_subscription(user, "https://push.example/a").await;

    let response = app
        .request(
            "POST",
            "/api/notifications/dispatch",
            Some(dispatch_body(SignalementId::new(), user, "vanished")),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    // The subscription survives a rejected request.
    assert_eq!(app.endpoints_for(user).await.len(), 1);
}

#[tokio::test]
async fn test_malformed_uuid_rejected() {
    let app = TestApp::new(ScriptedTransport::default());

    let response = app
        .request(
            "POST",
            "/api/notifications/dispatch",
            Some(serde_json::json!({
                "signalement_id": "not-a-uuid",
                "user_id": UserId::new().to_string(),
                "new_status": "approved",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_no_subscriptions_is_valid_outcome() {
    let app = TestApp::new(ScriptedTransport::default());

    let response = app
        .request(
            "POST",
            "/api/notifications/dispatch",
            Some(dispatch_body(SignalementId::new(), UserId::new(), "approved")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        serde_json::json!({ "sent": 0, "message": "No subscriptions found" })
    );
}

#[tokio::test]
async fn test_all_delivered_omits_failed() {
    let app = TestApp::new(ScriptedTransport::default());
    let user = UserId::new();
    app.seed_subscription(user, "https://push.example/a").await;
    app.seed_subscription(user, "https://push.example/b").await;

    let response = app
        .request(
            "POST",
            "/api/notifications/dispatch",
            Some(dispatch_body(SignalementId::new(), user, "resolved")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "sent": 2 }));
}

#[tokio::test]
async fn test_end_to_end_delivered_gone_timeout() {
    let transport = ScriptedTransport::default()
        .with_status("https://push.example/gone", 410)
        .with_hang("https://push.example/slow");
    let app = TestApp::new(transport);

    let user = UserId::new();
    app.seed_subscription(user, "https://push.example/ok").await;
    app.seed_subscription(user, "https://push.example/gone").await;
    app.seed_subscription(user, "https://push.example/slow").await;

    let response = app
        .request(
            "POST",
            "/api/notifications/dispatch",
            Some(dispatch_body(SignalementId::new(), user, "approved")),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({ "sent": 1, "failed": 1 }));

    // The gone endpoint is pruned; the timed-out one is retained.
    let endpoints = app.endpoints_for(user).await;
    assert!(!endpoints.contains(&"https://push.example/gone".to_string()));
    assert!(endpoints.contains(&"https://push.example/slow".to_string()));
    assert!(endpoints.contains(&"https://push.example/ok".to_string()));
}

#[tokio::test]
async fn test_preflight_carries_permissive_cors_headers() {
    let app = TestApp::new(ScriptedTransport::default());

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/notifications/dispatch")
        .header("Origin", "https://app.example")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .expect("Failed to build request");

    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap()),
        Some("*")
    );
}
