//! Server settings loaded from environment variables.
//!
//! Every option has a default except the provider API key, which may be left
//! empty: the server still starts, and generation requests fail until it is set.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GEMINI_API_KEY` | *(empty)*, falls back to `GEMINIAI_API_KEY` |
//! | `GEMINI_MODEL` | `gemini-2.5-pro` |
//! | `GEMINI_API_BASE` | `https://generativelanguage.googleapis.com` |
//! | `CORS_ALLOWED_ORIGINS` | `http://localhost:3000` |
//! | `PROMPT_MAX_LENGTH` | `2000` |
//! | `QUERY_MAX_LENGTH` | `2000` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `5000` |
//! | `DEBUG` | `0` |

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_MAX_LENGTH: usize = 2000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Older deployments name the key this way.
const LEGACY_API_KEY: &str = "GEMINIAI_API_KEY";

/// Settings loading errors.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that cannot be used.
    #[error("Invalid value '{value}' for {key}: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, value: impl Into<String>, message: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
            message: message.to_string(),
        }
    }
}

/// Process-wide configuration, read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Provider API key; empty when not configured.
    pub api_key: String,
    /// Model identifier used by both profiles.
    pub model: String,
    /// Provider base URL, without trailing slash.
    pub api_base: String,
    /// Origins allowed to call `/api/*` cross-origin.
    pub allowed_origins: Vec<String>,
    /// Maximum characters accepted in `prompt` on `/api/text_to_text`.
    pub prompt_max_length: usize,
    /// Maximum characters accepted in `query` on `/api/ask`.
    pub query_max_length: usize,
    pub host: String,
    pub port: u16,
    /// Raises the default log level to `debug`.
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            allowed_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_string()],
            prompt_max_length: DEFAULT_MAX_LENGTH,
            query_max_length: DEFAULT_MAX_LENGTH,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
        }
    }
}

// Keeps the API key out of logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "<unset>" })
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("allowed_origins", &self.allowed_origins)
            .field("prompt_max_length", &self.prompt_max_length)
            .field("query_max_length", &self.query_max_length)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Settings {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw),
            None => defaults.allowed_origins,
        };

        Ok(Self {
            api_key: get("GEMINI_API_KEY")
                .or_else(|| get(LEGACY_API_KEY))
                .unwrap_or_default(),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            api_base: get("GEMINI_API_BASE")
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            allowed_origins,
            prompt_max_length: parse_max_length("PROMPT_MAX_LENGTH", get("PROMPT_MAX_LENGTH"))?,
            query_max_length: parse_max_length("QUERY_MAX_LENGTH", get("QUERY_MAX_LENGTH"))?,
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_number("PORT", get("PORT"), defaults.port)?,
            debug: get("DEBUG").is_some_and(|v| is_truthy(&v)),
        })
    }

    /// Returns `true` if a provider API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Socket address string the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Splits a comma-separated origin list, dropping blank entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

fn parse_number<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match raw {
        Some(value) => value.parse().map_err(|e| ConfigError::invalid(key, value, e)),
        None => Ok(default),
    }
}

fn parse_max_length(key: &'static str, raw: Option<String>) -> Result<usize, ConfigError> {
    let value = parse_number(key, raw, DEFAULT_MAX_LENGTH)?;
    if value == 0 {
        return Err(ConfigError::invalid(key, "0", "must be greater than zero"));
    }
    Ok(value)
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
