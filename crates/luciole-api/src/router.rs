//! Route definitions for the Luciole HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(notification_routes())
        .merge(subscription_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Dispatch trigger endpoint.
fn notification_routes() -> Router<AppState> {
    Router::new().route(
        "/notifications/dispatch",
        post(handlers::dispatch::dispatch),
    )
}

/// Subscription registration, removal, and the VAPID key browsers need.
fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/push/subscriptions",
            post(handlers::subscription::subscribe).delete(handlers::subscription::unsubscribe),
        )
        .route(
            "/push/vapid-public-key",
            get(handlers::subscription::vapid_public_key),
        )
}

/// Liveness endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
