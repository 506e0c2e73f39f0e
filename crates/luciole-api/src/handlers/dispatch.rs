//! Dispatch trigger handler.

use axum::Json;
use axum::extract::State;
use tracing::info;

use crate::dto::request::DispatchRequest;
use crate::dto::response::DispatchResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/notifications/dispatch
///
/// Validates the trigger, fans the notification out to every subscription
/// of the user, and returns the aggregate counts. Validation failures
/// reject before any store access.
pub async fn dispatch(
    State(state): State<AppState>,
    Json(request): Json<DispatchRequest>,
) -> ApiResult<Json<DispatchResponse>> {
    let (signalement_id, user_id, status) = request.validate()?;

    info!(%signalement_id, %user_id, status = %status, "Dispatch triggered");

    let result = state
        .dispatcher
        .dispatch(user_id, signalement_id, status)
        .await?;

    if result.attempted_count == 0 {
        return Ok(Json(DispatchResponse::no_subscriptions()));
    }

    Ok(Json(DispatchResponse::from(result)))
}
