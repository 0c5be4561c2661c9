/// LLM Client — the single point of entry for all text-generation calls.
///
/// Speaks the OpenAI-compatible chat completions protocol (OpenRouter by default).
/// Credentials, model and endpoint are injected at construction.
///
/// `generate` never fails: every failure becomes a visible sentinel string so
/// the caller can still write an explanatory value into the field.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::Config;

pub mod prompts;

const REFERER: &str = "https://openrouter.ai";
const APP_TITLE: &str = "Smart Autofill";

pub const NO_RESPONSE: &str = "⚠️ No response from AI.";
pub const SERVICE_UNREACHABLE: &str = "⚠️ Error contacting AI service.";

pub fn api_error_sentinel(status: u16) -> String {
    format!("⚠️ API Error ({status})")
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status})")]
    Api { status: u16 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// The text written into a field in place of a completion.
    pub fn sentinel(&self) -> String {
        match self {
            LlmError::Http(_) => SERVICE_UNREACHABLE.to_string(),
            LlmError::Api { status } => api_error_sentinel(*status),
            LlmError::EmptyContent => NO_RESPONSE.to_string(),
        }
    }
}

/// Seam between the fill pass and whatever produces free text.
/// An `Err` means the request itself could not be made; the pass writes a failure message.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl ChatResponse {
    /// Trimmed content of the first choice, if any.
    fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl LlmClient {
    pub fn new(
        api_key: String,
        endpoint: String,
        model: String,
        timeout: Option<Duration>,
    ) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_key,
            endpoint,
            model,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, LlmError> {
        Self::new(
            config.generation_api_key.clone(),
            config.generation_api_url.clone(),
            config.generation_model.clone(),
            config.generation_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes one chat completion call. No retries.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompts::FORM_FIELD_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", APP_TITLE)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response.json().await?;
        let text = body.text().ok_or(LlmError::EmptyContent)?;
        debug!("Completion received ({} chars)", text.len());
        Ok(text.to_string())
    }

    /// Like `complete`, but failures come back as sentinel strings.
    pub async fn generate(&self, prompt: &str) -> String {
        match self.complete(prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("Generation request failed: {e}");
                e.sentinel()
            }
        }
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(self.generate(prompt).await)
    }
}
