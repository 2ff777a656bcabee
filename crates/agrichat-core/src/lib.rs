//! Core domain types and error definitions for agrichat.
//!
//! This crate provides the types shared by the model-access layer and the
//! HTTP server:
//!
//! - [`GenerationError`] — Error taxonomy for a single generation call
//! - [`ProfileKind`] and [`ModelProfile`] — Named, immutable model configurations
//! - [`GenerationParams`] — Sampling and thinking parameters sent upstream
//!
//! # Example
//!
//! ```rust
//! use agrichat_core::{ModelProfile, ProfileKind};
//!
//! let profile = ModelProfile::for_kind(ProfileKind::Agriculture, "gemini-2.5-pro");
//! assert!(profile.system_instruction.is_some());
//! assert_eq!(profile.params.thinking_budget, Some(1024));
//! ```

use std::fmt;

use thiserror::Error;

/// Persona instruction attached to every agriculture assistant request.
pub const AGRICULTURE_PROMPT: &str = r#"You are an **AI Agriculture Assistant** specialized in helping farmers, agri-entrepreneurs, and exporters.

Your purpose:
- Help ONLY with topics related to agriculture, farming, crop management, soil, fertilizers, irrigation, weather, pests, market prices, and export.
- If a question is NOT related to agriculture or farming, respond strictly:
  "I'm an Agriculture Assistant and can only answer agriculture-related questions."

Your responses must:
1. Start with a short summary.
2. Then provide step-by-step guidance.
3. Use simple, easy-to-understand language for farmers.
4. Give practical Indian agriculture examples when possible.
5. Avoid complex technical jargon.

Tone:
- Friendly, supportive, and educational.
- Clear, practical, and concise."#;

const DEFAULT_THINKING_BUDGET: u32 = 512;
const AGRICULTURE_THINKING_BUDGET: u32 = 1024;

/// Errors that can occur while obtaining a client or generating text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The provider cannot be used because configuration is missing.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider answered but produced no usable text.
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// Transport failure, non-success status, or undecodable provider body.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Upstream(format!("invalid response body: {}", err))
    }
}

/// Which of the two fixed profiles a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileKind {
    /// General chat, no system instruction.
    Default,
    /// Agriculture assistant persona.
    Agriculture,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Default => f.write_str("default"),
            ProfileKind::Agriculture => f.write_str("agriculture"),
        }
    }
}

/// Generation parameters forwarded to the provider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    /// Token budget the model may spend on internal reasoning.
    pub thinking_budget: Option<u32>,
}

/// Immutable model configuration used for one kind of request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelProfile {
    pub kind: ProfileKind,
    /// The provider's model identifier (e.g., "gemini-2.5-pro").
    pub model: String,
    /// Fixed instruction sent alongside every input, if any.
    pub system_instruction: Option<String>,
    pub params: GenerationParams,
}

impl ModelProfile {
    /// General chat profile.
    pub fn default_chat(model: impl Into<String>) -> Self {
        Self {
            kind: ProfileKind::Default,
            model: model.into(),
            system_instruction: None,
            params: GenerationParams {
                thinking_budget: Some(DEFAULT_THINKING_BUDGET),
            },
        }
    }

    /// Agriculture assistant profile carrying [`AGRICULTURE_PROMPT`].
    pub fn agriculture(model: impl Into<String>) -> Self {
        Self {
            kind: ProfileKind::Agriculture,
            model: model.into(),
            system_instruction: Some(AGRICULTURE_PROMPT.to_string()),
            params: GenerationParams {
                thinking_budget: Some(AGRICULTURE_THINKING_BUDGET),
            },
        }
    }

    /// Builds the profile for `kind`.
    pub fn for_kind(kind: ProfileKind, model: impl Into<String>) -> Self {
        match kind {
            ProfileKind::Default => Self::default_chat(model),
            ProfileKind::Agriculture => Self::agriculture(model),
        }
    }
}
