//! API Error Handling
//!
//! Unified error type and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalError(String),
}

/// Marks a response produced by a failed handler
///
/// Carries the handler's error message so the request logging middleware can
/// ship it; clients only see a generic message.
#[derive(Debug, Clone)]
pub struct ApplicationError(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": message })))
                    .into_response()
            }
            ApiError::InternalError(message) => {
                tracing::error!("Internal error: {}", message);
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "Internal Server Error" })),
                )
                    .into_response();
                response.extensions_mut().insert(ApplicationError(message));
                response
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
