//! The seam to the external chat-completion collaborator.
//!
//! The LLM service is a black box behind this trait; `salesdojo-interaction`
//! provides the HTTP implementation, and tests substitute doubles.

use crate::dialogue::ChatMessage;
use crate::error::Result;
use async_trait::async_trait;

/// One synchronous chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier understood by the collaborator.
    pub model: String,
    /// Full message list, system prompt first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Optional output length bound.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Creates a request without an output bound.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>, temperature: f32) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature,
            max_tokens: None,
        }
    }

    /// Bounds the output length.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A client for the external completion collaborator.
///
/// A single failure surfaces as `DojoError::Completion`; no retries are
/// attempted and the client-level timeout is the only bound on an
/// in-flight call.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends `request` and returns the assistant's full reply text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}
