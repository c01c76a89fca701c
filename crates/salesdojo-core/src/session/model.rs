//! The per-browser-session record.

use super::state::SessionState;
use crate::dialogue::DialogueHistory;
use crate::transcript::RowBuffer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Binds a session to its Conversation record and on-disk transcript file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationBinding {
    /// The Conversation id in the conversation store.
    pub conversation_id: String,
    /// Path of the conversation's transcript CSV file.
    pub log_path: PathBuf,
}

/// All transient state held server-side for one authenticated browser
/// session: lifecycle flags, the conversation binding, the running message
/// history, and the buffered coach rows.
///
/// This is the explicit session-table counterpart of what a web framework
/// would keep in its cookie-backed session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    /// Owning username.
    pub user: String,
    /// Lifecycle state machine.
    pub state: SessionState,
    /// Current Conversation binding, if a session has started.
    pub conversation: Option<ConversationBinding>,
    /// Running system/user/assistant message history.
    pub history: DialogueHistory,
    /// Coach rows awaiting acknowledgment or flush.
    pub buffer: RowBuffer,
    /// Last time this record was accessed, for idle eviction.
    pub last_touched: DateTime<Utc>,
}

impl TrainingSession {
    /// Creates a fresh record for `user` with no session started.
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            state: SessionState::new(),
            conversation: None,
            history: DialogueHistory::new(),
            buffer: RowBuffer::new(),
            last_touched: Utc::now(),
        }
    }

    /// Clears all per-session transient keys: the history, the buffered
    /// rows, and the prior conversation binding. Lifecycle flags survive,
    /// so a finished session stays finished.
    pub fn reset_transient(&mut self) {
        self.history.clear();
        self.buffer.clear();
        self.conversation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptRow;

    #[test]
    fn test_reset_transient_keeps_lifecycle() {
        let mut session = TrainingSession::new("alice");
        session.state.begin(Utc::now()).unwrap();
        session.history.seed_system("prompt");
        session.buffer.push(TranscriptRow::coach(Utc::now(), "advice"));
        session.conversation = Some(ConversationBinding {
            conversation_id: "c1".to_string(),
            log_path: PathBuf::from("/tmp/c1.csv"),
        });

        session.reset_transient();

        assert!(session.history.is_empty());
        assert!(session.buffer.is_empty());
        assert!(session.conversation.is_none());
        assert_eq!(session.state.phase, super::super::state::SessionPhase::Active);
    }
}
