//! Text-completion service seam and its OpenAI-compatible HTTP client.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ApiKey, SyncConfig};
use crate::error::SyncError;

/// Longest slice of an error body kept in error messages.
const ERROR_BODY_LIMIT: usize = 300;

/// A request/response text generation backend.
pub trait CompletionService: Send + Sync {
    /// What: Send one user-role prompt and return the generated text.
    ///
    /// Inputs:
    /// - `prompt`: Full instruction text
    ///
    /// Output:
    /// - Generated text, possibly empty
    ///
    /// # Errors
    /// - Returns `SyncError::TranslationService` on transport, auth, or service failure
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, SyncError>> + Send;
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    /// Model identifier.
    model: &'a str,
    /// Conversation; always a single user message.
    messages: [ChatMessage<'a>; 1],
}

/// One chat message.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    /// Message role.
    role: &'a str,
    /// Message text.
    content: &'a str,
}

/// Subset of the chat completion response this crate reads.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    /// Generated alternatives; only the first is used.
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

/// One generated alternative.
#[derive(Debug, Deserialize)]
struct ChatChoice {
    /// Generated message.
    message: Option<ChatReply>,
}

/// Generated message body.
#[derive(Debug, Deserialize)]
struct ChatReply {
    /// Generated text.
    content: Option<String>,
}

/// `CompletionService` backed by an OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    /// Pooled HTTP client.
    http: reqwest::Client,
    /// `{api_base}/chat/completions`.
    endpoint: String,
    /// Model identifier.
    model: String,
    /// Bearer credential.
    api_key: ApiKey,
}

impl OpenAiClient {
    /// What: Build a client from the run configuration.
    ///
    /// Inputs:
    /// - `config`: Supplies `api_base`, `model`, and `request_timeout_secs`
    /// - `api_key`: Bearer credential
    ///
    /// Output:
    /// - Ready-to-use client
    ///
    /// # Errors
    /// - Returns `SyncError::Configuration` when the HTTP client cannot be constructed
    pub fn new(config: &SyncConfig, api_key: ApiKey) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .user_agent(format!("catalog-fill/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SyncError::Configuration(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Chat completions endpoint in use.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionService for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, SyncError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SyncError::TranslationService(format!(
                "{status}: {}",
                truncate(&text, ERROR_BODY_LIMIT)
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        Ok(first_choice_text(parsed))
    }
}

/// Text of the first choice, or empty when the service returned none.
fn first_choice_text(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .unwrap_or_default()
}

/// Cut `text` to at most `limit` characters.
fn truncate(text: &str, limit: usize) -> &str {
    text.char_indices()
        .nth(limit)
        .map_or(text, |(idx, _)| &text[..idx])
}
