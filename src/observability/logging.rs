//! # Structured Logging
//!
//! Subscriber setup and span helpers built on the tracing ecosystem.
//! Log events carry service and key names as fields; secret values are never
//! recorded.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Create a tracing span for a store operation.
///
/// ```rust,ignore
/// let span = store_span!("read", "web");
/// let span = store_span!("read", "web", key = "api_key");
/// ```
#[macro_export]
macro_rules! store_span {
    ($operation:expr, $service:expr) => {
        tracing::debug_span!(
            "store_operation",
            operation = %$operation,
            service = %$service
        )
    };
    ($operation:expr, $service:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "store_operation",
            operation = %$operation,
            service = %$service,
            $($field)*
        )
    };
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. If a subscriber is
/// already installed (e.g. by a test harness) this is a no-op.
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    // Subscriber already set elsewhere; ignore.
    let _ = if config.json { builder.json().try_init() } else { builder.compact().try_init() };
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::StoreConfig) {
    tracing::info!(
        snapshot_path = ?config.snapshot_path,
        log_level = %config.logging.level,
        json_logging = config.logging.json,
        "Secret store configuration"
    );
}
