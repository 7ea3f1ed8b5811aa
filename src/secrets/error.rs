//! Error types for secret loading operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for secret loading operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur while loading a secret file.
///
/// Every variant is returned to the caller; the loader never retries.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// The load target is not a structured record.
    #[error("Invalid secret target: {reason}")]
    InvalidTarget { reason: String },

    /// The record type carries no embedded identity to stamp.
    #[error("Secret type `{type_name}` has no embedded identity field")]
    MissingIdentityField { type_name: String },

    /// The composed secret file does not exist.
    #[error("Secret file not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The secret file exists but could not be read.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The secret file is malformed or does not match the record shape.
    #[error("Failed to decode {}: {source}", path.display())]
    Deserialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SecretsError {
    /// Create an invalid target error.
    pub fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget { reason: reason.into() }
    }

    /// Create a missing identity error for the given record type.
    pub fn missing_identity(type_name: impl Into<String>) -> Self {
        Self::MissingIdentityField { type_name: type_name.into() }
    }

    /// Create a not found error.
    pub fn not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::NotFound { path: path.into(), source }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Create a deserialization error.
    pub fn deserialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Deserialization { path: path.into(), source }
    }

    /// Returns true if the secret file was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
