//! Global chat settings and their read-through cache.
//!
//! Administrators edit one `ChatSettings` row; the session lifecycle reads
//! the configured duration through a short-lived cache, so an edit takes
//! effect within about a minute without restarting the service.

use crate::error::Result;
use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default practice-session length: 20 minutes.
pub const DEFAULT_SESSION_DURATION_SECS: u64 = 20 * 60;

/// Lifetime of a cached settings read.
pub const SETTINGS_CACHE_TTL: Duration = Duration::from_secs(60);

/// Admin-edited global configuration, effectively a singleton row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSettings {
    /// Length of one training session in seconds.
    pub session_duration_secs: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            session_duration_secs: DEFAULT_SESSION_DURATION_SECS,
        }
    }
}

/// An abstract repository for the settings singleton.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Loads the stored settings, `None` when never configured.
    async fn load(&self) -> Result<Option<ChatSettings>>;

    /// Stores the settings (administrative operation).
    async fn save(&self, settings: &ChatSettings) -> Result<()>;
}

struct CachedSettings {
    settings: ChatSettings,
    fetched_at: Instant,
}

/// Read-through cache in front of the settings repository.
///
/// Reads never fail: a missing row or a storage error degrades to the
/// compiled-in defaults.
pub struct SettingsCache {
    repository: Arc<dyn SettingsRepository>,
    cache: RwLock<Option<CachedSettings>>,
    ttl: Duration,
}

impl SettingsCache {
    /// Creates a cache with the default 60 second TTL.
    pub fn new(repository: Arc<dyn SettingsRepository>) -> Self {
        Self::with_ttl(repository, SETTINGS_CACHE_TTL)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(repository: Arc<dyn SettingsRepository>, ttl: Duration) -> Self {
        Self {
            repository,
            cache: RwLock::new(None),
            ttl,
        }
    }

    /// Returns the current settings, from cache when unexpired.
    pub async fn current(&self) -> ChatSettings {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < self.ttl {
                    return cached.settings.clone();
                }
            }
        }

        let settings = match self.repository.load().await {
            Ok(Some(settings)) => settings,
            Ok(None) => ChatSettings::default(),
            Err(err) => {
                tracing::warn!("settings load failed, using defaults: {}", err);
                ChatSettings::default()
            }
        };

        let mut cache = self.cache.write().await;
        *cache = Some(CachedSettings {
            settings: settings.clone(),
            fetched_at: Instant::now(),
        });
        settings
    }

    /// The configured session duration as a `chrono::Duration`.
    pub async fn session_duration(&self) -> ChronoDuration {
        ChronoDuration::seconds(self.current().await.session_duration_secs as i64)
    }
}
