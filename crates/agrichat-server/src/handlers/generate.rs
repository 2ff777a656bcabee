//! Text generation endpoints.

use std::sync::Arc;

use agrichat_core::ProfileKind;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;
use tracing::warn;

use crate::dto::ReplyResponse;
use crate::error::AppError;
use crate::services;
use crate::state::AppState;
use crate::validation;

/// General chat. Expects `{"prompt": "..."}`.
pub async fn text_to_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ReplyResponse>, AppError> {
    let max = state.settings.prompt_max_length;
    respond(&state, "/text_to_text", "prompt", max, ProfileKind::Default, payload).await
}

/// Agriculture assistant. Expects `{"query": "..."}`.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ReplyResponse>, AppError> {
    let max = state.settings.query_max_length;
    respond(&state, "/ask", "query", max, ProfileKind::Agriculture, payload).await
}

async fn respond(
    state: &AppState,
    route: &str,
    field: &str,
    max_chars: usize,
    kind: ProfileKind,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ReplyResponse>, AppError> {
    let input = validation::json_body(payload, field, max_chars)
        .and_then(|body| validation::required_text(&body, field, max_chars))
        .map_err(|e| {
            warn!("Rejected {} request: {:?}", route, e);
            e
        })?;

    let reply = services::generation::reply(state, route, kind, &input).await?;
    Ok(Json(ReplyResponse { reply }))
}
