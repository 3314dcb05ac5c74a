//! Error types for the Fiscal Flow shell.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the shell and its collaborators.
///
/// The state machine itself only produces `SessionUnavailable` and
/// `SignOutFailed`; the remaining variants come from the infrastructure
/// layer (file-backed preferences, configuration).
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShellError {
    /// The session query failed or returned no session.
    ///
    /// Handled by redirecting to the entry route, never shown to the user.
    #[error("Session unavailable: {0}")]
    SessionUnavailable(String),

    /// The identity provider rejected the sign-out request.
    #[error("Sign out failed: {0}")]
    SignOutFailed(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ShellError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a SessionUnavailable error
    pub fn session_unavailable(message: impl Into<String>) -> Self {
        Self::SessionUnavailable(message.into())
    }

    /// Creates a SignOutFailed error
    pub fn sign_out_failed(message: impl Into<String>) -> Self {
        Self::SignOutFailed(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a SessionUnavailable error
    pub fn is_session_unavailable(&self) -> bool {
        matches!(self, Self::SessionUnavailable(_))
    }

    /// Check if this is a SignOutFailed error
    pub fn is_sign_out_failed(&self) -> bool {
        matches!(self, Self::SignOutFailed(_))
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ShellError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ShellError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ShellError>`.
pub type Result<T> = std::result::Result<T, ShellError>;
