//! Data transfer objects for HTTP message serialization.

use serde::Serialize;

/// Greeting returned by `GET /`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Liveness response returned by `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Successful generation result.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: String,
}
