//! Text generation against Google's Gemini API.
//!
//! - [`TextGenerator`] — the single capability the server needs from a provider
//! - [`GeminiClient`] — `generateContent` REST adapter
//! - [`ModelAccess`] — owns the lazily built client and the two fixed profiles
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use agrichat_core::ProfileKind;
//! use agrichat_llm::ModelAccess;
//!
//! let access = ModelAccess::gemini(api_key, "https://generativelanguage.googleapis.com", "gemini-2.5-pro");
//! let reply = access.generate(ProfileKind::Agriculture, "When should I sow wheat?").await?;
//! ```

mod access;
mod gemini;

use agrichat_core::{GenerationError, ModelProfile};
use async_trait::async_trait;

pub use access::{ClientFactory, ModelAccess};
pub use gemini::GeminiClient;

/// A provider that turns one input into one block of text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a reply to `input` using the model and instruction in `profile`.
    ///
    /// Returns trimmed, non-empty text or a [`GenerationError`] describing why
    /// none was produced.
    async fn generate(&self, profile: &ModelProfile, input: &str) -> Result<String, GenerationError>;
}
