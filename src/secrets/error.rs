//! Error types for secret store operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for secret store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur while building or querying a secret store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested service or key does not exist in the store.
    #[error("Secret not found: {service}/{key}")]
    NotFound { service: String, key: String },

    /// The snapshot file could not be read.
    #[error("Failed to read secrets snapshot '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON or does not match `service -> key -> string`.
    #[error("Malformed secrets snapshot '{}': {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Backend-specific error.
    #[error("Backend error: {message}")]
    BackendError { message: String },
}

impl StoreError {
    /// Create a not found error.
    pub fn not_found(service: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound { service: service.into(), key: key.into() }
    }

    /// Create a backend error.
    pub fn backend_error(message: impl Into<String>) -> Self {
        Self::BackendError { message: message.into() }
    }

    /// Returns true if this is a [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
