//! Shared server state.

use agrichat_config::Settings;
use agrichat_llm::ModelAccess;

/// Shared server state accessible from all handlers.
pub struct AppState {
    pub settings: Settings,
    pub access: ModelAccess,
}

impl AppState {
    /// Builds state backed by the Gemini API described in `settings`.
    pub fn new(settings: Settings) -> Self {
        let access = ModelAccess::gemini(&settings.api_key, &settings.api_base, &settings.model);
        Self { settings, access }
    }

    /// Builds state around an already constructed model-access context.
    pub fn with_access(settings: Settings, access: ModelAccess) -> Self {
        Self { settings, access }
    }
}
