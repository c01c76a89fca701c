//! TOML-backed prompt store.
//!
//! The whole store is one small admin-edited file with at most two entries:
//!
//! ```text
//! [customer]
//! content = "You are playing the role of a potential customer..."
//!
//! [coach]
//! content = "You are a silent sales coach..."
//! ```

use async_trait::async_trait;
use salesdojo_core::error::Result;
use salesdojo_core::prompt::{Prompt, PromptKey, PromptRepository};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PromptEntry {
    content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PromptsFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<PromptEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coach: Option<PromptEntry>,
}

/// File-backed implementation of [`PromptRepository`].
pub struct TomlPromptRepository {
    path: PathBuf,
}

impl TomlPromptRepository {
    /// Creates a repository reading and writing `<base>/prompts.toml`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: crate::paths::prompts_file(base_dir.as_ref()),
        }
    }

    fn load_file(&self) -> Result<PromptsFile> {
        if !self.path.exists() {
            return Ok(PromptsFile::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(PromptsFile::default());
        }
        Ok(toml::from_str(&content)?)
    }

    fn write_file(&self, file: &PromptsFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(file)?)?;
        Ok(())
    }
}

#[async_trait]
impl PromptRepository for TomlPromptRepository {
    async fn find_by_key(&self, key: PromptKey) -> Result<Option<Prompt>> {
        let file = self.load_file()?;
        let entry = match key {
            PromptKey::Customer => file.customer,
            PromptKey::Coach => file.coach,
        };
        Ok(entry.map(|e| Prompt {
            key,
            content: e.content,
        }))
    }

    async fn save(&self, prompt: &Prompt) -> Result<()> {
        let mut file = self.load_file()?;
        let entry = Some(PromptEntry {
            content: prompt.content.clone(),
        });
        match prompt.key {
            PromptKey::Customer => file.customer = entry,
            PromptKey::Coach => file.coach = entry,
        }
        self.write_file(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_yields_none() {
        let dir = TempDir::new().unwrap();
        let repo = TomlPromptRepository::new(dir.path());
        assert!(repo.find_by_key(PromptKey::Customer).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_find() {
        let dir = TempDir::new().unwrap();
        let repo = TomlPromptRepository::new(dir.path());

        let prompt = Prompt {
            key: PromptKey::Coach,
            content: "Observe silently.".to_string(),
        };
        repo.save(&prompt).await.unwrap();

        let found = repo.find_by_key(PromptKey::Coach).await.unwrap().unwrap();
        assert_eq!(found.content, "Observe silently.");
        // The other key stays absent
        assert!(repo.find_by_key(PromptKey::Customer).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_preserves_the_other_key() {
        let dir = TempDir::new().unwrap();
        let repo = TomlPromptRepository::new(dir.path());

        repo.save(&Prompt {
            key: PromptKey::Customer,
            content: "Be skeptical.".to_string(),
        })
        .await
        .unwrap();
        repo.save(&Prompt {
            key: PromptKey::Coach,
            content: "Advise briefly.".to_string(),
        })
        .await
        .unwrap();

        let customer = repo.find_by_key(PromptKey::Customer).await.unwrap().unwrap();
        assert_eq!(customer.content, "Be skeptical.");
    }
}
