//! Bearer-token authentication.
//!
//! Login and credential storage live outside this service. Every request
//! carries an opaque session token in the `Authorization` header; the
//! authenticator resolves it to a username. The default implementation is a
//! static token table loaded from the server configuration.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use std::collections::HashMap;

/// Resolves an opaque session token to a username.
pub trait Authenticator: Send + Sync {
    /// Returns the username for `token`, or `None` when unknown.
    fn resolve(&self, token: &str) -> Option<String>;
}

/// Token table fixed at startup, from the `[tokens]` section of the config.
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, String>,
}

impl StaticTokenAuthenticator {
    /// Creates an authenticator over a token-to-username table.
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

impl Authenticator for StaticTokenAuthenticator {
    fn resolve(&self, token: &str) -> Option<String> {
        self.tokens.get(token).cloned()
    }
}

/// Extracts the bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
