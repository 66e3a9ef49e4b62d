//! Generative collaborator interface and its OpenAI-compatible HTTP client.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::error::KeywordError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Longest slice of an error body kept in [`KeywordError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// One prompt sent to the generative collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Raw completion text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    pub text: String,
}

/// Text-generation backend used by the first two cascade tiers.
pub trait KeywordGenerator: Send + Sync {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationResponse, KeywordError>> + Send;
}

impl<G: KeywordGenerator> KeywordGenerator for Arc<G> {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationResponse, KeywordError>> + Send {
        (**self).generate(request)
    }
}

/// Client for `POST {base_url}/chat/completions`.
///
/// Use [`ChatCompletionsClient::new`] for the hosted API or
/// [`ChatCompletionsClient::with_base_url`] to point at a compatible gateway
/// or a mock server in tests.
pub struct ChatCompletionsClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    /// # Errors
    ///
    /// Returns [`KeywordError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, KeywordError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`KeywordError::InvalidConfig`] for a blank key or an
    /// unparseable base URL, and [`KeywordError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, KeywordError> {
        if api_key.trim().is_empty() {
            return Err(KeywordError::InvalidConfig("API key is blank".to_owned()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("scrapeplan/0.1 (keyword-synthesis)")
            .build()?;

        let normalised = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised).map_err(|e| {
            KeywordError::InvalidConfig(format!("invalid base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    async fn complete(&self, request: &GenerationRequest) -> Result<GenerationResponse, KeywordError> {
        let body = ChatRequest {
            model: &request.model_id,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(MAX_ERROR_BODY_CHARS)
                .collect();
            return Err(KeywordError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&raw).map_err(|e| KeywordError::Deserialize {
                context: format!("chat completion (model={})", request.model_id),
                source: e,
            })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(KeywordError::EmptyResponse)?;

        Ok(GenerationResponse { text })
    }
}

impl KeywordGenerator for ChatCompletionsClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, KeywordError> {
        self.complete(request).await
    }
}

impl std::fmt::Debug for ChatCompletionsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}
