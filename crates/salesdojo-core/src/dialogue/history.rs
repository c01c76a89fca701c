//! The running message history of one practice session.

use super::message::{ChatMessage, MessageRole};
use serde::{Deserialize, Serialize};

/// Ordered sequence of role-tagged messages scoped to one practice session.
///
/// Invariant: the history is either empty, or starts with exactly one
/// `system` entry followed by alternating `user`/`assistant` entries.
/// After N completed customer turns it holds `1 + 2N` messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialogueHistory {
    messages: Vec<ChatMessage>,
}

impl DialogueHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no message has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total number of messages, including the system prompt.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Number of messages excluding the system prompt.
    pub fn non_system_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .count()
    }

    /// Inserts the persona system prompt. Only valid on an empty history;
    /// a second system message would break the invariant, so it is ignored.
    pub fn seed_system(&mut self, prompt: impl Into<String>) {
        if self.messages.is_empty() {
            self.messages.push(ChatMessage::system(prompt));
        }
    }

    /// Appends a salesperson turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Appends an AI persona turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    /// All messages in order, system prompt included.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The last `n` non-system messages, oldest first.
    pub fn last_non_system(&self, n: usize) -> Vec<ChatMessage> {
        let non_system: Vec<ChatMessage> = self
            .messages
            .iter()
            .filter(|m| m.role != MessageRole::System)
            .cloned()
            .collect();
        let skip = non_system.len().saturating_sub(n);
        non_system.into_iter().skip(skip).collect()
    }

    /// Removes and returns the most recent message. Used to roll back an
    /// unpaired user turn when the completion call fails, keeping the
    /// alternation invariant intact.
    pub fn pop(&mut self) -> Option<ChatMessage> {
        self.messages.pop()
    }

    /// Drops everything, used when a new session starts.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
