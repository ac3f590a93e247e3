//! Error types for the Sante application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Sante application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SanteError {
    /// Raw input does not match the current question's answer domain.
    ///
    /// This is a UI-contract violation: a well-behaved presentation layer
    /// only offers inputs derived from the question's declared domain. The
    /// flow controller rejects the input and leaves its state unchanged.
    #[error("invalid answer kind for question '{question_id}': {detail}")]
    InvalidAnswerKind { question_id: String, detail: String },

    /// Registration was attempted with no known email.
    #[error("no email available for registration")]
    MissingEmail,

    /// A request failed because the access token expired or was rejected.
    #[error("authentication expired")]
    AuthExpired,

    /// Transport-level failure (connection, timeout, DNS).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status code.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", "TOML", "wire", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Entity not found error with type information
    #[error("entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl SanteError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidAnswerKind error
    pub fn invalid_answer(question_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::InvalidAnswerKind {
            question_id: question_id.into(),
            detail: detail.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Server error
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a wire-format serialization error
    pub fn wire(message: impl Into<String>) -> Self {
        Self::Serialization {
            format: "wire".to_string(),
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an AuthExpired error
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }

    /// Check if this is an InvalidAnswerKind error
    pub fn is_invalid_answer(&self) -> bool {
        matches!(self, Self::InvalidAnswerKind { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the failed operation is worth offering to the user again.
    ///
    /// Transport and server failures are transient from the caller's point of
    /// view; everything else either recovered already (auth refresh) or needs
    /// a different fix than a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SanteError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SanteError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SanteError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SanteError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, SanteError>`.
pub type Result<T> = std::result::Result<T, SanteError>;
