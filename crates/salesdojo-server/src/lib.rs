//! HTTP surface of salesdojo: an axum router over the training use case,
//! with bearer-token authentication and error-to-status mapping.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

pub use auth::{Authenticator, StaticTokenAuthenticator};
pub use config::ServerConfig;
pub use routes::{create_router, AppState};
