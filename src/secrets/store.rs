//! Core store trait and data model.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::Result;
use super::kind::{StoreCapabilities, StoreKind};
use super::types::SecretString;

/// Identifies a secret by service and key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SecretId {
    pub service: String,
    pub key: String,
}

impl SecretId {
    pub fn new(service: impl Into<String>, key: impl Into<String>) -> Self {
        Self { service: service.into(), key: key.into() }
    }
}

impl fmt::Display for SecretId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.service, self.key)
    }
}

/// Provenance of a [`Secret`], not its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretMetadata {
    /// Version of the value
    pub version: u64,
    /// Key the secret is stored under
    pub key: String,
}

/// A secret value plus metadata.
///
/// `value` is `None` when a backend omitted it, e.g. `list` called with
/// `include_values = false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Secret {
    pub value: Option<SecretString>,
    pub meta: SecretMetadata,
}

impl Secret {
    pub fn new(key: impl Into<String>, value: impl Into<SecretString>, version: u64) -> Self {
        Self {
            value: Some(value.into()),
            meta: SecretMetadata { version, key: key.into() },
        }
    }

    pub fn key(&self) -> &str {
        &self.meta.key
    }

    pub fn version(&self) -> u64 {
        self.meta.version
    }

    /// Returns the raw value, if present. Never log the result.
    pub fn expose_value(&self) -> Option<&str> {
        self.value.as_ref().map(SecretString::expose_secret)
    }

    /// Copy of this secret with the value dropped.
    pub fn without_value(&self) -> Self {
        Self { value: None, meta: self.meta.clone() }
    }
}

/// Kind of mutation recorded in a [`ChangeEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

/// Audit record of a historical mutation to a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub key: String,
    /// Version produced by the change
    pub version: u64,
    pub kind: ChangeKind,
    pub occurred_at: DateTime<Utc>,
}

/// Trait for secret store backends.
///
/// Backends differ in what they actually support; see [`Store::capabilities`].
/// Unsupported mutations are not errors: `write` and `delete` report success
/// without effect and `history` returns an empty list. Callers that must know
/// whether a mutation landed have to check the capability flags first.
///
/// # Security Considerations
///
/// - Implementations MUST NOT log secret values, only service and key names
/// - Values are carried as [`SecretString`] and exposed only on request
/// - A backend shared between tasks must be safe for concurrent reads
///
/// # Example Implementation
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use secretstore::secrets::*;
///
/// struct EmptyStore;
///
/// #[async_trait]
/// impl Store for EmptyStore {
///     async fn read(&self, id: &SecretId, _version: u64) -> Result<Secret> {
///         Err(StoreError::not_found(&id.service, &id.key))
///     }
///
///     async fn list(&self, _service: &str, _include_values: bool) -> Result<Vec<Secret>> {
///         Ok(Vec::new())
///     }
///
///     // history, delete, write ...
///
///     fn kind(&self) -> StoreKind {
///         StoreKind::Json
///     }
///
///     fn capabilities(&self) -> StoreCapabilities {
///         StoreCapabilities::read_only()
///     }
/// }
/// ```
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch one secret.
    ///
    /// Backends without version history may ignore `version`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`](super::StoreError::NotFound) if the service or key is absent
    async fn read(&self, id: &SecretId, version: u64) -> Result<Secret>;

    /// Fetch every secret of a service.
    ///
    /// An unknown service yields an empty list, not an error. With
    /// `include_values = false` a backend may leave values out; callers should
    /// not infer value presence from the flag alone.
    async fn list(&self, service: &str, include_values: bool) -> Result<Vec<Secret>>;

    /// Change events for a secret, oldest first.
    async fn history(&self, id: &SecretId) -> Result<Vec<ChangeEvent>>;

    /// Remove a secret. No-op success on backends without delete support.
    async fn delete(&self, id: &SecretId) -> Result<()>;

    /// Create or update a secret. No-op success on backends without write support.
    async fn write(&self, id: &SecretId, value: &str) -> Result<()>;

    /// Backend variant.
    fn kind(&self) -> StoreKind;

    /// Operations this backend meaningfully implements.
    fn capabilities(&self) -> StoreCapabilities;

    /// Check if a secret exists.
    async fn exists(&self, id: &SecretId) -> Result<bool> {
        match self.read(id, 1).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
