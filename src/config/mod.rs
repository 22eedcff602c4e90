//! # Configuration Management
//!
//! Configuration for the secret store tooling, read from environment
//! variables:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `SECRET_STORE_SNAPSHOT_PATH` | unset | JSON snapshot to load |
//! | `SECRET_STORE_LOG_LEVEL` | `info` | default log level (`RUST_LOG` overrides) |
//! | `SECRET_STORE_JSON_LOGS` | `false` | emit JSON log lines |

use std::path::PathBuf;

use validator::{Validate, ValidationError};

use crate::secrets::JsonStore;
use crate::{Error, Result};

const ENV_SNAPSHOT_PATH: &str = "SECRET_STORE_SNAPSHOT_PATH";
const ENV_LOG_LEVEL: &str = "SECRET_STORE_LOG_LEVEL";
const ENV_JSON_LOGS: &str = "SECRET_STORE_JSON_LOGS";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration
#[derive(Debug, Clone, Default, Validate)]
pub struct StoreConfig {
    /// Path of the JSON snapshot backing the store
    pub snapshot_path: Option<PathBuf>,

    #[validate(nested)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Validate)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "validate_log_level"))]
    pub level: String,

    /// Enable JSON structured logging
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

impl StoreConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let snapshot_path = std::env::var_os(ENV_SNAPSHOT_PATH)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let level = std::env::var(ENV_LOG_LEVEL)
            .map(|l| l.trim().to_lowercase())
            .unwrap_or_else(|_| "info".to_string());

        let json = match std::env::var(ENV_JSON_LOGS) {
            Ok(v) => parse_bool(&v).ok_or_else(|| {
                Error::config(format!("Invalid {}: expected true/false, got '{}'", ENV_JSON_LOGS, v))
            })?,
            Err(_) => false,
        };

        let config = Self { snapshot_path, logging: LoggingConfig { level, json } };
        config.validate()?;
        Ok(config)
    }

    /// Override the snapshot path, e.g. from a command line flag
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Load the configured snapshot
    pub fn open_store(&self) -> Result<JsonStore> {
        let path = self.snapshot_path.as_ref().ok_or_else(|| {
            Error::config(format!("No secrets snapshot configured (set {})", ENV_SNAPSHOT_PATH))
        })?;
        Ok(JsonStore::from_path(path)?)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}
