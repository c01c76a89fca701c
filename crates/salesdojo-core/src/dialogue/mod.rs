//! Dialogue domain: message types and the running conversation history.

pub mod history;
pub mod message;

pub use history::DialogueHistory;
pub use message::{ChatMessage, MessageRole};
