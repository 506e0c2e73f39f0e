//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use luciole_core::error::{AppError, ErrorKind};

/// Standard API error response body.
///
/// Callers only ever see a single message; per-endpoint delivery
/// diagnostics stay in the logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// Wrapper carrying an [`AppError`] across the axum boundary.
///
/// Handlers return [`ApiResult`] so that `?` on any fallible domain
/// call converts through `From<AppError>` into the HTTP mapping below.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match &err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Configuration
            | ErrorKind::Database
            | ErrorKind::Delivery
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(kind = %err.kind, error = %err.message, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse { error: err.message };

        (status, Json(body)).into_response()
    }
}
