//! Read-only secret store backed by a static JSON snapshot.
//!
//! The snapshot maps service names to objects of `key -> value` strings:
//!
//! ```json
//! {
//!   "web": { "api_key": "abc123" },
//!   "db":  { "password": "s3cret", "user": "app" }
//! }
//! ```
//!
//! The whole document is parsed once at construction into an in-memory index.
//! All queries are served from memory without I/O, and the index is never
//! mutated afterwards, so a `JsonStore` can be shared across tasks without
//! locking.
//!
//! # Example
//!
//! ```rust,no_run
//! use secretstore::secrets::{JsonStore, SecretId, Store};
//!
//! # async fn run() -> secretstore::secrets::Result<()> {
//! let store = JsonStore::from_path("secrets.json")?;
//! let secret = store.read(&SecretId::new("web", "api_key"), 1).await?;
//! assert_eq!(secret.version(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! - Every secret is version 1; the requested version is ignored
//! - `write()` and `delete()` return `Ok(())` and change nothing
//! - `history()` is always empty
//!
//! A caller that writes through this backend sees apparent success with no
//! effect. Check [`Store::capabilities`] when that matters.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, instrument};

use super::error::{Result, StoreError};
use super::kind::{StoreCapabilities, StoreKind};
use super::store::{ChangeEvent, Secret, SecretId, Store};
use super::types::SecretString;

/// Version assigned to every snapshot secret.
pub const SNAPSHOT_VERSION: u64 = 1;

/// Origin recorded in errors for documents that did not come from a file.
const INLINE_ORIGIN: &str = "<inline>";

/// On-disk shape: service -> key -> value.
type Document = HashMap<String, BTreeMap<String, SecretString>>;

/// Secrets of one service, ordered by key.
type ServiceSecrets = BTreeMap<String, Secret>;

/// In-memory snapshot store.
///
/// # Security
///
/// Values are held as [`SecretString`], so the index never prints them through
/// `Debug` and zeroes them when the store is dropped. Load events log service
/// and secret counts only.
///
/// # Example
///
/// ```rust,ignore
/// use secretstore::secrets::{JsonStore, SecretId, Store};
///
/// let store: JsonStore = r#"{"db": {"password": "s3cret"}}"#.parse()?;
/// let listed = store.list("db", false).await?;
/// assert!(listed[0].value.is_none());
///
/// // Accepted, but nothing changes
/// store.write(&SecretId::new("db", "password"), "new").await?;
/// assert!(store.capabilities().is_read_only());
/// ```
///
/// Construction fails with [`StoreError::Io`] when the file cannot be read and
/// [`StoreError::Malformed`] when the document is not `service -> key -> string`.
#[derive(Debug, Clone, Default)]
pub struct JsonStore {
    services: HashMap<String, ServiceSecrets>,
}

impl JsonStore {
    /// Loads a snapshot from a file.
    ///
    /// # Arguments
    ///
    /// * `path` - JSON document of `service -> key -> value` strings
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] if the file cannot be read, [`StoreError::Malformed`]
    /// if it is not a valid snapshot. Both carry the path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read(path)
            .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;

        Self::from_slice(&raw, path)
    }

    /// Loads a snapshot from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let origin = Path::new(INLINE_ORIGIN);
        let document: Document = serde_json::from_reader(reader)
            .map_err(|source| StoreError::Malformed { path: origin.to_path_buf(), source })?;
        Ok(Self::from_document(document, origin))
    }

    fn from_slice(raw: &[u8], origin: &Path) -> Result<Self> {
        let document: Document = serde_json::from_slice(raw)
            .map_err(|source| StoreError::Malformed { path: origin.to_path_buf(), source })?;
        Ok(Self::from_document(document, origin))
    }

    fn from_document(document: Document, origin: &Path) -> Self {
        let services: HashMap<String, ServiceSecrets> = document
            .into_iter()
            .map(|(service, entries)| {
                let secrets = entries
                    .into_iter()
                    .map(|(key, value)| {
                        let secret = Secret::new(key.clone(), value, SNAPSHOT_VERSION);
                        (key, secret)
                    })
                    .collect();
                (service, secrets)
            })
            .collect();

        let store = Self { services };
        // Counts only; values never reach the log
        info!(
            path = %origin.display(),
            services = store.services.len(),
            secrets = store.len(),
            "Loaded secrets snapshot"
        );
        store
    }

    /// Names of all loaded services, sorted.
    pub fn services(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Total number of secrets across all services.
    pub fn len(&self) -> usize {
        self.services.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, id: &SecretId) -> Option<&Secret> {
        self.services.get(&id.service)?.get(&id.key)
    }
}

impl FromStr for JsonStore {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes(), Path::new(INLINE_ORIGIN))
    }
}

#[async_trait]
impl Store for JsonStore {
    #[instrument(skip(self, id), fields(service = %id.service, key = %id.key))]
    async fn read(&self, id: &SecretId, version: u64) -> Result<Secret> {
        if version != SNAPSHOT_VERSION {
            debug!(
                requested = version,
                served = SNAPSHOT_VERSION,
                "Snapshot store has no version history, serving version 1"
            );
        }

        self.lookup(id).cloned().ok_or_else(|| StoreError::not_found(&id.service, &id.key))
    }

    #[instrument(skip(self))]
    async fn list(&self, service: &str, include_values: bool) -> Result<Vec<Secret>> {
        let Some(secrets) = self.services.get(service) else {
            return Ok(Vec::new());
        };

        let listed = secrets
            .values()
            .map(|secret| if include_values { secret.clone() } else { secret.without_value() })
            .collect();
        Ok(listed)
    }

    async fn history(&self, _id: &SecretId) -> Result<Vec<ChangeEvent>> {
        // No change log in a snapshot
        Ok(Vec::new())
    }

    async fn delete(&self, id: &SecretId) -> Result<()> {
        debug!(secret = %id, "Ignoring delete on read-only JSON snapshot store");
        Ok(())
    }

    async fn write(&self, id: &SecretId, _value: &str) -> Result<()> {
        debug!(secret = %id, "Ignoring write on read-only JSON snapshot store");
        Ok(())
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Json
    }

    fn capabilities(&self) -> StoreCapabilities {
        StoreCapabilities::read_only()
    }
}
