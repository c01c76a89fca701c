//! HTTP client for the external chat-completion collaborator.

pub mod openai_client;

pub use openai_client::OpenAiClient;
