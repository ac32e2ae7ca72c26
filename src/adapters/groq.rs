//! Groq Provider - Implementation of CompletionProvider for Groq's API.
//!
//! Groq exposes an OpenAI-compatible chat-completions endpoint; this adapter
//! translates between the completion port and that wire format.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GroqConfig::new(api_key)
//!     .with_model("llama-3.3-70b-versatile")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let provider = GroqProvider::new(config);
//! ```
//!
//! Transient failures (rate limits, network errors, 5xx) are retried with a
//! linear backoff up to `max_retries`; everything else propagates
//! immediately.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, ProviderInfo,
    TokenUsage,
};

const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

/// Configuration for the Groq provider.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl GroqConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            max_retries: 3,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Groq API provider implementation.
pub struct GroqProvider {
    config: GroqConfig,
    client: Client,
}

impl GroqProvider {
    /// Creates a new Groq provider with the given configuration.
    pub fn new(config: GroqConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Converts a port request to Groq's wire format.
    fn to_wire_request(&self, request: &CompletionRequest) -> WireRequest {
        let mut messages = Vec::new();

        if let Some(ref prompt) = request.system_prompt {
            messages.push(WireMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }

        for msg in &request.messages {
            messages.push(WireMessage {
                role: match msg.role {
                    crate::ports::ChatRole::System => "system",
                    crate::ports::ChatRole::User => "user",
                    crate::ports::ChatRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            });
        }

        WireRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }

    async fn send(&self, wire: &WireRequest) -> Result<CompletionResponse, CompletionError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(wire)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_secs: self.config.timeout.as_secs(),
                    }
                } else {
                    CompletionError::network(e.to_string())
                }
            })?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body: WireResponse = response
                    .json()
                    .await
                    .map_err(|e| CompletionError::parse(e.to_string()))?;
                self.to_completion_response(body)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(CompletionError::AuthenticationFailed)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30);
                Err(CompletionError::rate_limited(retry_after))
            }
            s if s.is_server_error() => {
                let body = response.text().await.unwrap_or_default();
                Err(CompletionError::unavailable(format!("{}: {}", s, body)))
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                Err(CompletionError::InvalidRequest(format!(
                    "unexpected status {}: {}",
                    s, body
                )))
            }
        }
    }

    fn to_completion_response(
        &self,
        body: WireResponse,
    ) -> Result<CompletionResponse, CompletionError> {
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(CompletionError::EmptyReply);
        }

        Ok(CompletionResponse {
            content,
            model: body.model.unwrap_or_else(|| self.config.model.clone()),
            usage: body
                .usage
                .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens)),
        })
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let wire = self.to_wire_request(&request);

        let mut attempt = 0;
        loop {
            match self.send(&wire).await {
                Ok(response) => {
                    if let Some(usage) = &response.usage {
                        tracing::debug!(
                            prompt_tokens = usage.prompt_tokens,
                            completion_tokens = usage.completion_tokens,
                            "completion succeeded"
                        );
                    }
                    return Ok(response);
                }
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(error = %err, attempt, "retrying completion request");
                    sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("groq", self.config.model.clone())
    }
}

// === Wire format ===

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct WireChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
