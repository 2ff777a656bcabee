//! Application error types and Axum response conversion.

use agrichat_core::GenerationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application-level errors with HTTP status code mapping.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    NotFound(String),
    /// Invalid input, or a provider reply with no usable text.
    BadRequest(String),
    MethodNotAllowed(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Provider details stay in the server log; the caller gets a fixed message.
impl From<GenerationError> for AppError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Configuration(_) => {
                AppError::Internal("Model provider is not configured".into())
            }
            GenerationError::EmptyResponse(reason) => AppError::BadRequest(reason),
            GenerationError::Upstream(_) => {
                AppError::Internal("Upstream model request failed".into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_errors_map_to_status_classes() {
        assert_eq!(
            AppError::from(GenerationError::Configuration("GEMINI_API_KEY must be set".into())),
            AppError::Internal("Model provider is not configured".into())
        );
        assert_eq!(
            AppError::from(GenerationError::EmptyResponse("No text".into())),
            AppError::BadRequest("No text".into())
        );
        assert_eq!(
            AppError::from(GenerationError::Upstream("connection refused".into())),
            AppError::Internal("Upstream model request failed".into())
        );
    }

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::MethodNotAllowed("x".into()), StatusCode::METHOD_NOT_ALLOWED),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
