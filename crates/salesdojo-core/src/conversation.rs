//! Conversation records and their persistence trait.
//!
//! A Conversation binds one user to one transcript file and start time.
//! One record exists per practice session; a restart creates a new record
//! instead of mutating the old one.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// One persisted practice-session record. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation identifier (UUID format).
    pub id: String,
    /// Owning username.
    pub user: String,
    /// When the practice session started.
    pub started_at: DateTime<Utc>,
    /// Path of the transcript CSV file.
    pub log_path: PathBuf,
}

impl Conversation {
    /// Creates a new conversation record for `user` with a fresh id.
    pub fn new(user: impl Into<String>, started_at: DateTime<Utc>, log_path: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user: user.into(),
            started_at,
            log_path,
        }
    }
}

/// An abstract repository for conversation persistence.
///
/// Decouples the session lifecycle from the specific storage mechanism
/// (JSON files, a database, a remote API).
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Finds a conversation by its id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Conversation))`: conversation found
    /// - `Ok(None)`: no conversation with that id
    /// - `Err(_)`: storage failure
    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>>;

    /// Saves a conversation record.
    async fn save(&self, conversation: &Conversation) -> Result<()>;

    /// Lists all conversations owned by `user`, most recent first.
    async fn list_for_user(&self, user: &str) -> Result<Vec<Conversation>>;
}
