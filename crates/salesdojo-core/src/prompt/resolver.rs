//! Cached prompt resolution with compiled-in fallbacks.

use super::model::PromptKey;
use super::repository::PromptRepository;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default lifetime of a cached prompt text.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

struct CachedText {
    text: String,
    fetched_at: Instant,
}

/// Resolves a persona prompt by key with a short-lived cache.
///
/// `resolve` never fails: a missing row or a storage error degrades to the
/// supplied fallback text, which is then cached like any other result so a
/// broken store is not hammered on every turn.
pub struct PromptResolver {
    repository: Arc<dyn PromptRepository>,
    cache: RwLock<HashMap<PromptKey, CachedText>>,
    ttl: Duration,
}

impl PromptResolver {
    /// Creates a resolver with the default 60 second cache TTL.
    pub fn new(repository: Arc<dyn PromptRepository>) -> Self {
        Self::with_ttl(repository, DEFAULT_CACHE_TTL)
    }

    /// Creates a resolver with a custom cache TTL.
    pub fn with_ttl(repository: Arc<dyn PromptRepository>, ttl: Duration) -> Self {
        Self {
            repository,
            cache: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Returns the prompt text for `key`, consulting the cache first and
    /// falling back to `fallback` when no stored value exists or the store
    /// fails.
    pub async fn resolve(&self, key: PromptKey, fallback: &str) -> String {
        {
            let cache = self.cache.read().await;
            if let Some(cached) = cache.get(&key) {
                if cached.fetched_at.elapsed() < self.ttl {
                    return cached.text.clone();
                }
            }
        }

        let text = match self.repository.find_by_key(key).await {
            Ok(Some(prompt)) => prompt.content,
            Ok(None) => fallback.to_string(),
            Err(err) => {
                tracing::warn!("prompt lookup for {} failed: {}", key.as_str(), err);
                fallback.to_string()
            }
        };

        let mut cache = self.cache.write().await;
        cache.insert(
            key,
            CachedText {
                text: text.clone(),
                fetched_at: Instant::now(),
            },
        );
        text
    }

    /// Resolves `key` with its compiled-in fallback.
    pub async fn resolve_default(&self, key: PromptKey) -> String {
        self.resolve(key, key.fallback()).await
    }
}
