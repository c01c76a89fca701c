//! File-backed conversation store, one JSON document per record.

use async_trait::async_trait;
use salesdojo_core::conversation::{Conversation, ConversationRepository};
use salesdojo_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists conversations as pretty-printed JSON files under
/// `<base>/conversations/<id>.json`.
pub struct JsonConversationRepository {
    dir: PathBuf,
}

impl JsonConversationRepository {
    /// Creates the repository, ensuring the directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = crate::paths::conversations_dir(base_dir.as_ref());
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn file_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn load_from(&self, path: &Path) -> Result<Conversation> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[async_trait]
impl ConversationRepository for JsonConversationRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Conversation>> {
        let path = self.file_path(id);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(self.load_from(&path)?))
    }

    async fn save(&self, conversation: &Conversation) -> Result<()> {
        let json = serde_json::to_string_pretty(conversation)?;
        fs::write(self.file_path(&conversation.id), json)?;
        Ok(())
    }

    async fn list_for_user(&self, user: &str) -> Result<Vec<Conversation>> {
        let mut conversations = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            match self.load_from(&path) {
                Ok(conversation) if conversation.user == user => {
                    conversations.push(conversation);
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!("skipping unreadable conversation {:?}: {}", path, err);
                }
            }
        }

        // Most recent first
        conversations.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(conversations)
    }
}
