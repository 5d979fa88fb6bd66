//! Maps domain `AppError` to HTTP responses.
//!
//! `AppError` lives in `collabhub-core`, so the response mapping hangs off
//! the local `ApiError` wrapper. Handlers and extractors return `ApiError`
//! and `?` converts service errors on the way out.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use collabhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An `AppError` on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status code and error code for a kind. Anything not meant for callers
/// is a 500.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = status_for(err.kind);

        let message = if status.is_server_error() {
            tracing::error!(
                kind = %err.kind,
                error = %err.message,
                source = ?err.source,
                "Internal server error"
            );
            if err.kind == ErrorKind::Internal {
                err.message
            } else {
                "Internal server error".to_string()
            }
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
