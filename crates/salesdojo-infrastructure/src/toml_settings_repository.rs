//! TOML-backed settings store, a single admin-edited file.

use async_trait::async_trait;
use salesdojo_core::error::Result;
use salesdojo_core::settings::{ChatSettings, SettingsRepository};
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed implementation of [`SettingsRepository`], reading and
/// writing `<base>/settings.toml`.
pub struct TomlSettingsRepository {
    path: PathBuf,
}

impl TomlSettingsRepository {
    /// Creates a repository for the given data directory.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            path: crate::paths::settings_file(base_dir.as_ref()),
        }
    }
}

#[async_trait]
impl SettingsRepository for TomlSettingsRepository {
    async fn load(&self) -> Result<Option<ChatSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(toml::from_str(&content)?))
    }

    async fn save(&self, settings: &ChatSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(settings)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_yields_none() {
        let dir = TempDir::new().unwrap();
        let repo = TomlSettingsRepository::new(dir.path());
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let repo = TomlSettingsRepository::new(dir.path());

        repo.save(&ChatSettings {
            session_duration_secs: 600,
        })
        .await
        .unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.session_duration_secs, 600);
    }
}
