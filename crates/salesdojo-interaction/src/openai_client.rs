//! Direct REST implementation of the completion collaborator against the
//! OpenAI Chat Completions API.
//!
//! No retries and no streaming: a single failure maps to
//! `DojoError::Completion`, and the request timeout is the only bound on an
//! in-flight call.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use salesdojo_core::completion::{CompletionClient, CompletionRequest};
use salesdojo_core::dialogue::ChatMessage;
use salesdojo_core::error::{DojoError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

const BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Completion client that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client with the provided API key and the default timeout.
    ///
    /// # Errors
    ///
    /// Returns a config error if the underlying HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Creates a client with a custom request timeout.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DojoError::config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Overrides the endpoint URL, for proxies and tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Loads the API key from `OPENAI_API_KEY` (or the legacy `OPENAI_KEY`).
    ///
    /// # Errors
    ///
    /// Returns a config error if neither variable is set.
    pub fn try_from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .or_else(|_| env::var("OPENAI_KEY"))
            .map_err(|_| {
                DojoError::config("OPENAI_API_KEY not found in environment variables")
            })?;
        Self::new(api_key)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(model = %request.model, "completion request failed: {}", err);
                DojoError::Completion {
                    status_code: None,
                    message: format!("completion request failed: {}", err),
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            tracing::warn!(
                model = %request.model,
                status = status.as_u16(),
                "completion API rejected the request"
            );
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            tracing::warn!(model = %request.model, "malformed completion response: {}", err);
            DojoError::Completion {
                status_code: None,
                message: format!("failed to parse completion response: {}", err),
            }
        })?;

        extract_text_response(parsed)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| DojoError::completion("completion API returned no content"))
}

fn map_http_error(status: StatusCode, body: String) -> DojoError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);
    DojoError::Completion {
        status_code: Some(status.as_u16()),
        message,
    }
}
