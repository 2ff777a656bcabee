//! HTTP route handlers for the agrichat server.

pub mod generate;

use axum::Json;

use crate::dto::{MessageResponse, StatusResponse};
use crate::error::AppError;

/// Root greeting.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello, Guest! Welcome to AI Agent API.",
    })
}

/// Liveness probe; independent of provider configuration.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

/// JSON 404 for unknown paths.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not found".into())
}

/// JSON 405 for known paths hit with the wrong method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed("Method not allowed".into())
}
