//! Application error types and Axum response conversion.

use std::any::Any;

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use calc_core::AgentError;
use tracing::error;

use crate::dto::ErrorResponse;

/// The only detail ever returned for a server-side failure.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

/// Application-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// Server-side failure. The message is for logs only.
    Internal(String),
    /// Request body rejected before reaching a handler.
    Rejected { status: StatusCode, detail: String },
}

impl From<AgentError> for AppError {
    fn from(e: AgentError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR.to_string()),
            AppError::Rejected { status, detail } => (status, detail),
        };
        (status, Json(ErrorResponse { detail })).into_response()
    }
}

/// JSON body extractor whose rejections use the `{"detail": ...}` error shape.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Converts a handler panic into the same opaque 500 response as any other failure.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", message);

    AppError::Internal(message.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_error_detail_is_suppressed() {
        let response = AppError::from(AgentError::LlmError("secret upstream detail".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_rejection_keeps_status() {
        let response = AppError::Rejected {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: "missing field".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_handle_panic_is_opaque() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
