//! # Observability
//!
//! Structured logging for the secret store and its tooling.

pub mod logging;

pub use logging::{init_logging, log_config_info};
