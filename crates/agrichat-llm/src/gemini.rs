//! Google Gemini `generateContent` client.

use std::time::Instant;

use agrichat_core::{GenerationError, ModelProfile};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::TextGenerator;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize, Default)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

fn build_request<'a>(profile: &'a ModelProfile, input: &'a str) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part { text: input }],
        }],
        system_instruction: profile.system_instruction.as_deref().map(|text| Content {
            role: None,
            parts: vec![Part { text }],
        }),
        generation_config: GenerationConfig {
            thinking_config: profile
                .params
                .thinking_budget
                .map(|thinking_budget| ThinkingConfig { thinking_budget }),
        },
    }
}

/// Pulls the reply text out of a decoded response, or explains why there is none.
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenerationError::EmptyResponse(format!(
            "Prompt blocked by provider ({})",
            reason
        )));
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GenerationError::EmptyResponse("Empty response from Gemini API".into()));
    };

    let text = candidate
        .content
        .unwrap_or_default()
        .parts
        .into_iter()
        .filter(|p| !p.thought)
        .filter_map(|p| p.text)
        .collect::<String>();

    let text = text.trim();
    if text.is_empty() {
        debug!("Candidate without text, finish reason: {:?}", candidate.finish_reason);
        return Err(GenerationError::EmptyResponse("No text returned from Gemini API".into()));
    }

    Ok(text.to_string())
}

/// Client for the Gemini REST API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl GeminiClient {
    /// Creates a client, failing with [`GenerationError::Configuration`] when
    /// `api_key` is empty.
    pub fn new(api_key: &str, api_base: &str) -> Result<Self, GenerationError> {
        if api_key.is_empty() {
            error!("GEMINI_API_KEY is missing");
            return Err(GenerationError::Configuration("GEMINI_API_KEY must be set".into()));
        }

        Ok(Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, profile: &ModelProfile, input: &str) -> Result<String, GenerationError> {
        let start = Instant::now();
        let request = build_request(profile, input);

        let response = self
            .client
            .post(self.endpoint(&profile.model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Upstream(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Upstream(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let decoded: GenerateContentResponse = serde_json::from_str(&body)?;
        let usage = decoded.usage_metadata.as_ref().map_or((0, 0), |u| {
            (u.prompt_token_count, u.candidates_token_count)
        });

        info!(
            "Gemini ({}, {}): {}ms, tokens: {}/{} (in/out)",
            profile.model,
            profile.kind,
            start.elapsed().as_millis(),
            usage.0,
            usage.1
        );

        extract_text(decoded)
    }
}
