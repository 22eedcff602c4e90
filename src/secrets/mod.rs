//! Secret store abstraction.
//!
//! The [`Store`] trait is the contract every backend implements:
//! - **read**: fetch one secret by service and key
//! - **list**: fetch all secrets of a service
//! - **history**: change events for a secret, oldest first
//! - **write** / **delete**: mutations, silent no-ops on read-only backends
//!
//! Backends report what they actually support through [`Store::capabilities`],
//! because an unsupported mutation returns `Ok(())` rather than an error.
//!
//! # Backends
//!
//! - [`JsonStore`]: read-only snapshot loaded from a JSON file
//! - [`FallbackStore`]: composes two stores, trying the second when the first fails
//!
//! # Example
//!
//! ```rust,no_run
//! use secretstore::secrets::{JsonStore, SecretId, Store};
//!
//! # async fn run() -> secretstore::secrets::Result<()> {
//! let store = JsonStore::from_path("secrets.json")?;
//!
//! let api_key = store.read(&SecretId::new("web", "api_key"), 1).await?;
//! let all_web = store.list("web", false).await?;
//!
//! if !store.capabilities().write {
//!     // writes would be accepted and dropped
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Security Considerations
//!
//! - Values are wrapped in [`SecretString`] and redacted in logs and serialization
//! - Backends log service and key names only, never values

pub mod error;
pub mod fallback;
pub mod json;
pub mod kind;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use fallback::FallbackStore;
pub use json::{JsonStore, SNAPSHOT_VERSION};
pub use kind::{StoreCapabilities, StoreKind};
pub use store::{ChangeEvent, ChangeKind, Secret, SecretId, SecretMetadata, Store};
pub use types::SecretString;
