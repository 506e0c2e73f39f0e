//! Subscription registration and removal handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use crate::dto::request::{SubscribeRequest, UnsubscribeRequest};
use crate::dto::response::VapidPublicKeyResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/push/subscriptions
///
/// Upserts on `(user_id, endpoint)`: re-registering the same browser
/// replaces its credential material instead of duplicating the row.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> ApiResult<StatusCode> {
    let subscription = request.into_new_subscription()?;
    let row = state.store.upsert(&subscription).await?;

    info!(user_id = %row.user_id, endpoint = %row.endpoint, "Subscription registered");

    Ok(StatusCode::CREATED)
}

/// DELETE /api/push/subscriptions
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(request): Json<UnsubscribeRequest>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .store
        .delete_many(std::slice::from_ref(&request.endpoint))
        .await?;

    info!(endpoint = %request.endpoint, deleted, "Subscription removed");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/push/vapid-public-key
///
/// Browsers need the application server key as `applicationServerKey`
/// when calling `pushManager.subscribe`.
pub async fn vapid_public_key(State(state): State<AppState>) -> Json<VapidPublicKeyResponse> {
    Json(VapidPublicKeyResponse {
        public_key: state.config.push.vapid_public_key.clone(),
    })
}
