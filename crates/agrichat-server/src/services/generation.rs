//! Generation service: one provider call per validated request.

use std::time::Instant;

use agrichat_core::ProfileKind;
use tracing::{debug, error, info};

use crate::error::AppError;
use crate::state::AppState;

/// Generates a reply for `input` with the profile for `kind`.
///
/// Provider failures are logged in full here and converted to the short
/// client-facing form of [`AppError`].
pub async fn reply(
    state: &AppState,
    route: &str,
    kind: ProfileKind,
    input: &str,
) -> Result<String, AppError> {
    let start = Instant::now();
    info!("{} request ({} profile, {} chars)", route, kind, input.chars().count());
    debug!("{} input: {}...", route, input.chars().take(50).collect::<String>());

    match state.access.generate(kind, input).await {
        Ok(text) => {
            info!("{} replied in {}ms", route, start.elapsed().as_millis());
            Ok(text)
        }
        Err(e) => {
            error!("Error in {}: {}", route, e);
            Err(AppError::from(e))
        }
    }
}
