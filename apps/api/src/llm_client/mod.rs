//! LLM Client: the single point of entry for all generative-model calls.
//!
//! ARCHITECTURAL RULE: flows talk to the model only through the
//! `GenerativeModel` trait. `LlmClient` is the production implementation
//! (Anthropic Messages API); tests substitute `fake::FakeModel`.
//!
//! Every call is at-most-once. There is no retry loop: a failed call is
//! reported to the caller, who decides whether to ask again.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
pub mod fake;
pub mod media;
pub mod prompts;

use media::ImageAttachment;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all advisory calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited (retry after {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A fully rendered request: persona/system text, the user instruction, and
/// any images referenced by it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub text: String,
    pub images: Vec<ImageAttachment>,
}

impl Prompt {
    pub fn new(system: &str, text: String) -> Self {
        Self {
            system: system.to_string(),
            text,
            images: Vec::new(),
        }
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.images.push(image);
        self
    }
}

/// The declared shape a model answer must satisfy, as a JSON Schema object.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConstraint {
    pub name: &'static str,
    pub schema: Value,
}

impl OutputConstraint {
    pub fn new(name: &'static str, schema: Value) -> Self {
        Self { name, schema }
    }
}

/// Capability interface over the hosted model. Implementations return the
/// model's JSON answer; checking it against the constraint is the caller's job.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn complete(
        &self,
        prompt: &Prompt,
        constraint: &OutputConstraint,
    ) -> Result<Value, LlmError>;

    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: String,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    source_type: &'static str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic-backed `GenerativeModel`. Cheap to clone; the HTTP connection
/// pool is shared.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    /// `timeout` bounds a single HTTP exchange; it is a transport limit, not
    /// an operation deadline.
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    /// Makes a single call to the Messages API and returns the raw response.
    pub async fn call(&self, prompt: &Prompt, system: String) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: content_parts(prompt),
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            warn!("LLM API rate limited the request");
            return Err(LlmError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl GenerativeModel for LlmClient {
    async fn complete(
        &self,
        prompt: &Prompt,
        constraint: &OutputConstraint,
    ) -> Result<Value, LlmError> {
        let system = prompts::structured_system_prompt(&prompt.system, constraint);
        let response = self.call(prompt, system).await?;

        let text = response.text().ok_or(LlmError::EmptyContent)?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }

    fn model_name(&self) -> &str {
        MODEL
    }
}

/// Images go first so the instruction text can refer to them.
fn content_parts(prompt: &Prompt) -> Vec<ContentPart<'_>> {
    prompt
        .images
        .iter()
        .map(|image| ContentPart::Image {
            source: ImageSource {
                source_type: "base64",
                media_type: &image.media_type,
                data: &image.data,
            },
        })
        .chain(std::iter::once(ContentPart::Text { text: &prompt.text }))
        .collect()
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };
    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(|s| s.trim())
        .unwrap_or(stripped)
}
