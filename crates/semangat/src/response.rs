//! JSON error responses shared by handlers.

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Error body: `{"error": "...", "detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub type ErrorResponse = (StatusCode, Json<ErrorBody>);

fn error(
    status: StatusCode,
    message: impl Into<String>,
    detail: Option<String>,
) -> ErrorResponse {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
            detail,
        }),
    )
}

/// 400 with a message.
pub fn bad_request(message: impl Into<String>) -> ErrorResponse {
    error(StatusCode::BAD_REQUEST, message, None)
}

/// 500 with a message and diagnostic detail.
pub fn internal_error(message: impl Into<String>, detail: impl Into<String>) -> ErrorResponse {
    error(
        StatusCode::INTERNAL_SERVER_ERROR,
        message,
        Some(detail.into()),
    )
}

/// 503 with a message.
pub fn service_unavailable(message: impl Into<String>) -> ErrorResponse {
    error(StatusCode::SERVICE_UNAVAILABLE, message, None)
}
