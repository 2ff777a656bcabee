//! HTTP server for general chat and the agriculture assistant.
//!
//! Routes:
//!
//! | Method & Path | Handler |
//! |---------------|---------|
//! | `GET /` | [`handlers::root`] |
//! | `GET /api/status` | [`handlers::status`] |
//! | `POST /api/text_to_text` | [`handlers::generate::text_to_text`] |
//! | `POST /api/ask` | [`handlers::generate::ask`] |
//!
//! Only `/api/*` is exposed cross-origin.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;
pub mod state;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header::HeaderValue, Method, Request, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::AppError;
pub use state::AppState;

/// Builds the CORS policy for `/api/*` from the configured origin list.
///
/// A `*` entry reflects the caller's origin, since credentials rule out a
/// literal wildcard.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let api = Router::new()
        .route("/status", get(handlers::status))
        .route("/text_to_text", post(handlers::generate::text_to_text))
        .route("/ask", post(handlers::generate::ask))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(cors_layer(&state.settings.allowed_origins));

    Router::new()
        .route("/", get(handlers::root))
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .nest("/api", api)
        .fallback(handlers::not_found)
        .layer(trace_layer)
        .with_state(state)
}
