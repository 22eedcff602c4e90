//! Fallback store with primary and secondary backends.
//!
//! This module provides a store that tries a primary backend first and falls
//! back to a secondary backend when the primary fails or does not hold the
//! requested secret.
//!
//! # Use Cases
//!
//! - **Snapshot layering**: a current snapshot in front of a baseline snapshot
//! - **Graceful degradation**: keep serving reads from a local file while the
//!   primary source is unavailable
//!
//! # Example
//!
//! ```rust,ignore
//! use secretstore::secrets::{FallbackStore, JsonStore};
//!
//! let primary = JsonStore::from_path("/run/secrets/current.json")?;
//! let secondary = JsonStore::from_path("/etc/secrets/baseline.json")?;
//! let store = FallbackStore::new(primary, secondary);
//! ```
//!
//! # Semantics
//!
//! - `read`, `history`, `write` and `delete` go to the secondary only when the
//!   primary returns an error. `NotFound` counts as an error, so a secret
//!   missing from the primary is looked up in the secondary.
//! - `list` merges both sides by key, the primary winning on conflicts, so it
//!   agrees with what `read` would return for each key.
//! - Mutations and history are answered by the primary whenever it succeeds.
//!   A read-only primary acknowledges writes without effect and the secondary
//!   never sees them, so [`Store::capabilities`] reports the primary's flags.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::future::Future;

use super::error::{Result, StoreError};
use super::kind::{StoreCapabilities, StoreKind};
use super::store::{ChangeEvent, Secret, SecretId, Store};

/// Store that falls back to a secondary backend when the primary fails.
///
/// # Type Parameters
///
/// * `P` - Primary store, tried first (e.g. a current [`JsonStore`](super::JsonStore))
/// * `S` - Secondary store, consulted on primary errors and merged into `list`
///
/// # Capabilities
///
/// The composed store reports the primary's capabilities. A writable secondary
/// behind a read-only primary does not make the composition writable.
#[derive(Debug)]
pub struct FallbackStore<P: Store, S: Store> {
    primary: P,
    secondary: S,
}

impl<P: Store, S: Store> FallbackStore<P, S> {
    /// Creates a new fallback store.
    ///
    /// # Arguments
    ///
    /// * `primary` - Store tried first
    /// * `secondary` - Store tried when the primary fails
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }

    /// Try an operation on primary, fall back to secondary if it fails.
    async fn try_with_fallback<T, F, G>(&self, primary_op: F, secondary_op: G) -> Result<T>
    where
        F: Future<Output = Result<T>>,
        G: Future<Output = Result<T>>,
    {
        match primary_op.await {
            Ok(result) => Ok(result),
            Err(primary_error) => self.fall_back(primary_error, secondary_op).await,
        }
    }

    async fn fall_back<T, G>(&self, primary_error: StoreError, secondary_op: G) -> Result<T>
    where
        G: Future<Output = Result<T>>,
    {
        if primary_error.is_not_found() {
            tracing::debug!(
                error = %primary_error,
                secondary = %self.secondary.kind(),
                "Secret missing from primary store, trying fallback"
            );
        } else {
            tracing::warn!(
                error = %primary_error,
                primary = %self.primary.kind(),
                secondary = %self.secondary.kind(),
                "Primary secret store failed, attempting fallback"
            );
        }

        match secondary_op.await {
            Ok(result) => Ok(result),
            // Both sides agree the secret is absent: keep it a plain not-found
            Err(secondary_error)
                if primary_error.is_not_found() && secondary_error.is_not_found() =>
            {
                Err(secondary_error)
            }
            Err(secondary_error) => {
                tracing::error!(
                    primary_error = %primary_error,
                    secondary_error = %secondary_error,
                    "Both primary and fallback secret stores failed"
                );
                Err(StoreError::backend_error(format!(
                    "Primary store failed: {}. Fallback also failed: {}",
                    primary_error, secondary_error
                )))
            }
        }
    }
}

/// Union of two listings keyed by secret key, `primary` winning, sorted by key.
fn merge_by_key(primary: Vec<Secret>, secondary: Vec<Secret>) -> Vec<Secret> {
    let mut merged: BTreeMap<String, Secret> =
        secondary.into_iter().map(|s| (s.meta.key.clone(), s)).collect();
    merged.extend(primary.into_iter().map(|s| (s.meta.key.clone(), s)));
    merged.into_values().collect()
}

#[async_trait]
impl<P: Store, S: Store> Store for FallbackStore<P, S> {
    async fn read(&self, id: &SecretId, version: u64) -> Result<Secret> {
        self.try_with_fallback(self.primary.read(id, version), self.secondary.read(id, version))
            .await
    }

    async fn list(&self, service: &str, include_values: bool) -> Result<Vec<Secret>> {
        let primary_listed = match self.primary.list(service, include_values).await {
            Ok(secrets) => secrets,
            Err(e) => {
                return self.fall_back(e, self.secondary.list(service, include_values)).await;
            }
        };

        match self.secondary.list(service, include_values).await {
            Ok(secondary_listed) => Ok(merge_by_key(primary_listed, secondary_listed)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    service = %service,
                    "Fallback secret store failed to list, serving primary entries only"
                );
                Ok(primary_listed)
            }
        }
    }

    async fn history(&self, id: &SecretId) -> Result<Vec<ChangeEvent>> {
        self.try_with_fallback(self.primary.history(id), self.secondary.history(id)).await
    }

    async fn delete(&self, id: &SecretId) -> Result<()> {
        self.try_with_fallback(self.primary.delete(id), self.secondary.delete(id)).await
    }

    async fn write(&self, id: &SecretId, value: &str) -> Result<()> {
        self.try_with_fallback(self.primary.write(id, value), self.secondary.write(id, value))
            .await
    }

    fn kind(&self) -> StoreKind {
        self.primary.kind()
    }

    fn capabilities(&self) -> StoreCapabilities {
        // Successful primary answers never reach the secondary
        self.primary.capabilities()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::JsonStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    /// Store that always fails, standing in for an unreachable backend
    struct FailingStore;

    #[async_trait]
    impl Store for FailingStore {
        async fn read(&self, _id: &SecretId, _version: u64) -> Result<Secret> {
            Err(StoreError::backend_error("connection refused"))
        }

        async fn list(&self, _service: &str, _include_values: bool) -> Result<Vec<Secret>> {
            Err(StoreError::backend_error("connection refused"))
        }

        async fn history(&self, _id: &SecretId) -> Result<Vec<ChangeEvent>> {
            Err(StoreError::backend_error("connection refused"))
        }

        async fn delete(&self, _id: &SecretId) -> Result<()> {
            Err(StoreError::backend_error("connection refused"))
        }

        async fn write(&self, _id: &SecretId, _value: &str) -> Result<()> {
            Err(StoreError::backend_error("connection refused"))
        }

        fn kind(&self) -> StoreKind {
            StoreKind::Json
        }

        fn capabilities(&self) -> StoreCapabilities {
            StoreCapabilities { write: true, delete: true, ..Default::default() }
        }
    }

    fn snapshot(doc: &str) -> JsonStore {
        doc.parse().unwrap()
    }

    #[tokio::test]
    async fn test_fallback_on_primary_failure() {
        let store = FallbackStore::new(FailingStore, snapshot(r#"{"web":{"api_key":"abc123"}}"#));

        let secret = store.read(&SecretId::new("web", "api_key"), 1).await.unwrap();
        assert_eq!(secret.expose_value(), Some("abc123"));

        let listed = store.list("web", true).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let store = FallbackStore::new(snapshot(r#"{"web":{"api_key":"primary"}}"#), FailingStore);

        let secret = store.read(&SecretId::new("web", "api_key"), 1).await.unwrap();
        assert_eq!(secret.expose_value(), Some("primary"));
    }

    #[tokio::test]
    async fn test_missing_in_primary_found_in_secondary() {
        let store = FallbackStore::new(
            snapshot(r#"{"web":{"api_key":"abc123"}}"#),
            snapshot(r#"{"db":{"password":"s3cret"}}"#),
        );

        let secret = store.read(&SecretId::new("db", "password"), 1).await.unwrap();
        assert_eq!(secret.expose_value(), Some("s3cret"));
    }

    #[tokio::test]
    async fn test_missing_everywhere_stays_not_found() {
        let store = FallbackStore::new(snapshot("{}"), snapshot("{}"));

        let err = store.read(&SecretId::new("web", "api_key"), 1).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_both_backends_fail() {
        let store = FallbackStore::new(FailingStore, snapshot("{}"));

        let err = store.read(&SecretId::new("web", "api_key"), 1).await.unwrap_err();
        assert!(err.to_string().contains("Primary store failed"));
        assert!(err.to_string().contains("Fallback also failed"));
    }

    /// Writable store that counts the mutations it receives
    #[derive(Default)]
    struct RecordingStore {
        mutations: AtomicUsize,
    }

    impl RecordingStore {
        fn mutations(&self) -> usize {
            self.mutations.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Store for RecordingStore {
        async fn read(&self, id: &SecretId, _version: u64) -> Result<Secret> {
            Err(StoreError::not_found(&id.service, &id.key))
        }

        async fn list(&self, _service: &str, _include_values: bool) -> Result<Vec<Secret>> {
            Ok(Vec::new())
        }

        async fn history(&self, _id: &SecretId) -> Result<Vec<ChangeEvent>> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: &SecretId) -> Result<()> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn write(&self, _id: &SecretId, _value: &str) -> Result<()> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn kind(&self) -> StoreKind {
            StoreKind::Json
        }

        fn capabilities(&self) -> StoreCapabilities {
            StoreCapabilities { write: true, delete: true, history: true, versioning: false }
        }
    }

    #[tokio::test]
    async fn test_read_only_primary_hides_writable_secondary() {
        let store =
            FallbackStore::new(snapshot(r#"{"web":{"api_key":"abc"}}"#), RecordingStore::default());

        let caps = store.capabilities();
        assert!(!caps.write);
        assert!(!caps.delete);
        assert!(!caps.history);
        assert!(caps.is_read_only());

        let id = SecretId::new("web", "api_key");
        store.write(&id, "new").await.unwrap();
        store.delete(&id).await.unwrap();

        assert_eq!(store.secondary().mutations(), 0);
        let secret = store.read(&id, 1).await.unwrap();
        assert_eq!(secret.expose_value(), Some("abc"));
        assert_eq!(store.primary().len(), 1);
    }

    #[tokio::test]
    async fn test_writable_primary_reports_and_receives_writes() {
        let store = FallbackStore::new(RecordingStore::default(), snapshot("{}"));

        assert!(store.capabilities().write);
        store.write(&SecretId::new("web", "api_key"), "new").await.unwrap();
        assert_eq!(store.primary().mutations(), 1);
    }

    #[tokio::test]
    async fn test_list_merges_secondary_entries() {
        let store = FallbackStore::new(
            snapshot(r#"{"web":{"api_key":"abc123"}}"#),
            snapshot(r#"{"db":{"password":"s3cret"},"web":{"api_key":"old","token":"t0k"}}"#),
        );

        let db = store.list("db", true).await.unwrap();
        assert_eq!(db.len(), 1);
        assert_eq!(db[0].expose_value(), Some("s3cret"));

        let read = store.read(&SecretId::new("db", "password"), 1).await.unwrap();
        assert_eq!(read.expose_value(), db[0].expose_value());

        let web = store.list("web", true).await.unwrap();
        let pairs: Vec<(&str, Option<&str>)> =
            web.iter().map(|s| (s.key(), s.expose_value())).collect();
        assert_eq!(pairs, vec![("api_key", Some("abc123")), ("token", Some("t0k"))]);

        assert!(store.list("cache", true).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_survives_failing_secondary() {
        let store = FallbackStore::new(snapshot(r#"{"web":{"api_key":"abc123"}}"#), FailingStore);

        let web = store.list("web", false).await.unwrap();
        assert_eq!(web.len(), 1);
        assert!(web[0].value.is_none());
    }

    #[test]
    fn test_capabilities_follow_primary() {
        let store = FallbackStore::new(FailingStore, snapshot("{}"));
        let caps = store.capabilities();
        assert!(caps.write);
        assert!(caps.delete);
        assert!(!caps.history);
        assert_eq!(store.kind(), StoreKind::Json);

        let reversed = FallbackStore::new(snapshot("{}"), FailingStore);
        assert_eq!(reversed.capabilities(), StoreCapabilities::read_only());
    }

    #[test]
    #[traced_test]
    fn test_not_found_fallback_logs_at_debug() {
        let store = FallbackStore::new(snapshot("{}"), snapshot(r#"{"db":{"password":"s3cret"}}"#));
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

        runtime.block_on(store.read(&SecretId::new("db", "password"), 1)).unwrap();
        assert!(logs_contain("Secret missing from primary store"));
        assert!(!logs_contain("Primary secret store failed"));

        let failing = FallbackStore::new(FailingStore, snapshot(r#"{"db":{"password":"s3cret"}}"#));
        runtime.block_on(failing.read(&SecretId::new("db", "password"), 1)).unwrap();
        assert!(logs_contain("Primary secret store failed"));
    }
}
