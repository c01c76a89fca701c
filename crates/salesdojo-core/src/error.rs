//! Error types for the salesdojo application.

use thiserror::Error;

/// A shared error type for the entire salesdojo application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone)]
pub enum DojoError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A request carried an empty or whitespace-only message
    #[error("Empty input")]
    EmptyInput,

    /// The practice session is not active (expired, ended, or never started)
    #[error("Session is not active")]
    SessionInactive,

    /// The browser session already finished its practice session
    #[error("Session already finished")]
    SessionFinished,

    /// No buffered coach row exists to acknowledge
    #[error("No data: no buffered coach advice")]
    NoBufferedAdvice,

    /// The completion collaborator failed (timeout, quota, malformed response)
    #[error("Completion error: {message}")]
    Completion {
        status_code: Option<u16>,
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DojoError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Completion error without an HTTP status
    pub fn completion(message: impl Into<String>) -> Self {
        Self::Completion {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error rejects the request because of session state
    /// (inactive, expired, or already finished).
    pub fn is_session_state(&self) -> bool {
        matches!(self, Self::SessionInactive | Self::SessionFinished)
    }

    /// Check if this error rejects the request because of invalid input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::NoBufferedAdvice)
    }
}

impl From<std::io::Error> for DojoError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DojoError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DojoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DojoError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DojoError>`.
pub type Result<T> = std::result::Result<T, DojoError>;
