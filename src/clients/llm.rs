//! Text-completion collaborator.
//!
//! The workflow sends one prompt per invocation and uses the completion text
//! verbatim (after trimming) as a city identifier. Failures here are never
//! absorbed: they surface as [`LlmError`] and abort the invocation.

use async_trait::async_trait;
use miette::Diagnostic;
use serde_json::{Value, json};
use thiserror::Error;

/// Synchronous-contract completion collaborator: one prompt in, one text out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Errors from the completion collaborator.
#[derive(Debug, Error, Diagnostic)]
pub enum LlmError {
    /// Transport or body-decode failure.
    #[error("completion request failed: {0}")]
    #[diagnostic(code(weathervane::llm::http))]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned status {status}: {body}")]
    #[diagnostic(
        code(weathervane::llm::status),
        help("Check that GOOGLE_API_KEY is set and valid.")
    )]
    Status { status: u16, body: String },

    /// The response parsed but did not carry the expected fields.
    #[error("completion response missing {what}")]
    #[diagnostic(code(weathervane::llm::shape))]
    MalformedResponse { what: &'static str },
}

/// Gemini `generateContent` client.
///
/// Posts a single user turn and reads the first candidate's first text part.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_string(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the endpoint base, e.g. to point at a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let payload: Value = response.json().await?;
        let text = candidate_text(&payload).ok_or(LlmError::MalformedResponse {
            what: "candidates[0].content.parts[0].text",
        })?;
        Ok(text.to_string())
    }
}

/// Pull the first candidate's first text part out of a `generateContent`
/// response payload.
fn candidate_text(payload: &Value) -> Option<&str> {
    payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .get(0)?
        .get("text")?
        .as_str()
}
