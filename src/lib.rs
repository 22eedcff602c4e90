//! # secretstore
//!
//! A uniform contract for reading named, versioned secrets from a backing
//! source, plus a read-only backend that serves secrets from a static JSON
//! snapshot.
//!
//! ## Architecture
//!
//! ```text
//! caller → Store trait → JsonStore (service → key → secret, in memory)
//!                      → FallbackStore (primary, then secondary)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use secretstore::secrets::{JsonStore, SecretId, Store};
//!
//! #[tokio::main]
//! async fn main() -> secretstore::Result<()> {
//!     let store = JsonStore::from_path("secrets.json")?;
//!     let secret = store.read(&SecretId::new("web", "api_key"), 1).await?;
//!     println!("{} is at version {}", secret.key(), secret.version());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;

// Re-export commonly used types and traits
pub use config::{LoggingConfig, StoreConfig};
pub use errors::{Error, Result};
pub use secrets::{JsonStore, Secret, SecretId, Store, StoreError};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
