//! # Error Handling
//!
//! Crate-level error type used by configuration loading and the CLI. Store
//! operations have their own [`StoreError`](crate::secrets::StoreError), which
//! converts into [`Error`].

use crate::secrets::StoreError;

/// Custom result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Secret store errors
    #[error(transparent)]
    Store(#[from] StoreError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Display includes errors of nested structs
        Self::Config(format!("invalid settings: {}", errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_is_transparent() {
        let err: Error = StoreError::not_found("web", "api_key").into();
        assert_eq!(err.to_string(), "Secret not found: web/api_key");
        assert!(matches!(err, Error::Store(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("bad log level");
        assert_eq!(err.to_string(), "Configuration error: bad log level");
    }
}
