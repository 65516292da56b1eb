//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fpbridge_core::BridgeError;
use serde::Serialize;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 503 Service Unavailable (device link failure)
    ServiceUnavailable(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Standard error response format: `{"status": "error", "message": ...}`
#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(%status, %message, "API error");
        } else {
            tracing::debug!(%status, %message, "API client error");
        }

        let body = Json(ErrorResponse {
            status: "error",
            message,
        });

        (status, body).into_response()
    }
}

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Transport(msg) => ApiError::ServiceUnavailable(msg),
            BridgeError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            BridgeError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}
