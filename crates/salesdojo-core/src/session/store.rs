//! Server-side session table keyed by session token.

use super::model::TrainingSession;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Default idle lifetime of a session record, matching a typical
/// cookie-session expiry.
pub const DEFAULT_IDLE_TTL_SECS: i64 = 24 * 60 * 60;

/// In-memory table of per-token session records.
///
/// Each record is handed out behind its own `Mutex`, so concurrent requests
/// carrying the same token (for example a double-clicked "send") are
/// serialized instead of racing on the history and buffer.
///
/// Records untouched for longer than the idle TTL are evicted lazily on
/// access, mirroring cookie-session expiry.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<TrainingSession>>>>,
    idle_ttl: Duration,
}

impl SessionStore {
    /// Creates a store with the default idle TTL.
    pub fn new() -> Self {
        Self::with_idle_ttl(Duration::seconds(DEFAULT_IDLE_TTL_SECS))
    }

    /// Creates a store with a custom idle TTL.
    pub fn with_idle_ttl(idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Returns the record for `token`, creating a fresh one for `user` if
    /// none exists or the previous one sat idle past the TTL.
    pub async fn get_or_create(&self, token: &str, user: &str) -> Arc<Mutex<TrainingSession>> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();

        // Lazy sweep: drop idle records before serving the request.
        let mut expired = Vec::new();
        for (key, record) in sessions.iter() {
            if let Ok(session) = record.try_lock() {
                if now - session.last_touched > self.idle_ttl {
                    expired.push(key.clone());
                }
            }
        }
        for key in expired {
            sessions.remove(&key);
        }

        let record = sessions
            .entry(token.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(TrainingSession::new(user))))
            .clone();
        drop(sessions);

        record.lock().await.last_touched = now;
        record
    }

    /// Number of live records, for diagnostics and tests.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when the table holds no records.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_token_returns_same_record() {
        let store = SessionStore::new();
        let a = store.get_or_create("tok-1", "alice").await;
        let b = store.get_or_create("tok-1", "alice").await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_distinct_tokens_get_distinct_records() {
        let store = SessionStore::new();
        let a = store.get_or_create("tok-1", "alice").await;
        let b = store.get_or_create("tok-2", "bob").await;
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.lock().await.user, "bob");
    }

    #[tokio::test]
    async fn test_idle_record_is_evicted() {
        let store = SessionStore::with_idle_ttl(Duration::seconds(60));
        let record = store.get_or_create("tok-1", "alice").await;
        record.lock().await.last_touched = Utc::now() - Duration::seconds(120);

        let fresh = store.get_or_create("tok-1", "alice").await;
        assert!(!Arc::ptr_eq(&record, &fresh));
        assert!(fresh.lock().await.history.is_empty());
    }
}
