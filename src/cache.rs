//! Credential caching
//!
//! The frob and the session token live in two tiers: a process-local memory
//! cache and a persisted record (one flat file per secret under the cache
//! directory by default). Reads always try memory first; a successful
//! persisted read populates memory.

use crate::errors::{Error, Result};
use crate::telemetry::Metrics;
use crate::util::strip_whitespace;
use async_trait::async_trait;
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Name of a cached credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretName {
    /// Short-lived handshake identifier
    Frob,
    /// Long-lived session token
    Token,
}

impl SecretName {
    /// File name / cache key of the secret
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretName::Frob => "frob",
            SecretName::Token => "token",
        }
    }
}

impl fmt::Display for SecretName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend for the persisted credential tier
///
/// Implementations must report a missing record as `Ok(None)` and keep
/// `Err` for broken storage, so callers can tell "no credential yet" from
/// "storage unusable".
#[async_trait]
pub trait SecretPersistence: Send + Sync + fmt::Debug {
    /// Load a persisted secret
    async fn load(&self, name: SecretName) -> Result<Option<String>>;

    /// Persist a secret, replacing any previous value
    async fn store(&self, name: SecretName, value: &str) -> Result<()>;

    /// Delete a persisted secret; deleting a missing record is not an error
    async fn remove(&self, name: SecretName) -> Result<()>;
}

/// Stores each secret as a flat file inside a directory
#[derive(Debug, Clone)]
pub struct FileSystemPersistence {
    dir: PathBuf,
}

impl FileSystemPersistence {
    /// Create a backend rooted at `dir`; the directory is created on first use
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the secret files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: SecretName) -> PathBuf {
        self.dir.join(name.as_str())
    }

    async fn ensure_dir(&self) -> Result<()> {
        let mut builder = tokio::fs::DirBuilder::new();
        let _ = builder.recursive(true);
        #[cfg(unix)]
        let _ = builder.mode(0o700);
        builder
            .create(&self.dir)
            .await
            .map_err(|e| Error::storage(&self.dir, e))
    }
}

#[async_trait]
impl SecretPersistence for FileSystemPersistence {
    async fn load(&self, name: SecretName) -> Result<Option<String>> {
        self.ensure_dir().await?;
        let path = self.path(name);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::storage(path, e)),
        }
    }

    async fn store(&self, name: SecretName, value: &str) -> Result<()> {
        self.ensure_dir().await?;
        let path = self.path(name);
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| Error::storage(path, e))
    }

    async fn remove(&self, name: SecretName) -> Result<()> {
        let path = self.path(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::storage(path, e)),
        }
    }
}

/// Memory tier statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    inner: Arc<CacheStatsInner>,
}

#[derive(Debug, Default)]
struct CacheStatsInner {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    persist_failures: AtomicU64,
}

impl CacheStats {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(CacheStatsInner::default()),
        }
    }

    /// Reads answered from memory
    pub fn hits(&self) -> u64 {
        self.inner.hits.load(Ordering::Relaxed)
    }

    /// Reads that had to consult the persisted tier
    pub fn misses(&self) -> u64 {
        self.inner.misses.load(Ordering::Relaxed)
    }

    /// Values written to memory, by `write` or by a persisted read
    pub fn insertions(&self) -> u64 {
        self.inner.insertions.load(Ordering::Relaxed)
    }

    /// Writes that reached memory but failed to persist
    pub fn persist_failures(&self) -> u64 {
        self.inner.persist_failures.load(Ordering::Relaxed)
    }

    /// Get the hit rate as a percentage (0.0-100.0)
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }

    /// Reset all statistics to zero
    pub fn reset(&self) {
        self.inner.hits.store(0, Ordering::Relaxed);
        self.inner.misses.store(0, Ordering::Relaxed);
        self.inner.insertions.store(0, Ordering::Relaxed);
        self.inner.persist_failures.store(0, Ordering::Relaxed);
    }

    pub(crate) fn record_hit(&self) {
        let _ = self.inner.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        let _ = self.inner.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insertion(&self) {
        let _ = self.inner.insertions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_persist_failure(&self) {
        let _ = self.inner.persist_failures.fetch_add(1, Ordering::Relaxed);
    }
}

/// Two-tier store for the frob and the session token
#[derive(Clone)]
pub struct CredentialStore {
    memory: Cache<SecretName, SecretString>,
    persistence: Arc<dyn SecretPersistence>,
    stats: CacheStats,
    metrics: Option<Arc<Metrics>>,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("cached", &self.memory.entry_count())
            .field("stats", &self.stats)
            .finish()
    }
}

impl CredentialStore {
    /// Create a store over the given persisted tier
    pub fn new(persistence: Arc<dyn SecretPersistence>) -> Self {
        Self {
            memory: Cache::builder().max_capacity(8).build(),
            persistence,
            stats: CacheStats::new(),
            metrics: None,
        }
    }

    pub(crate) fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn record_lookup(&self, name: SecretName, hit: bool) {
        if hit {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        if let Some(metrics) = &self.metrics {
            metrics.record_cache(name.as_str(), hit);
        }
    }

    /// Create a store persisting to flat files under `dir`
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileSystemPersistence::new(dir)))
    }

    /// Memory tier statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Read a secret, memory first
    ///
    /// Returns `Ok(None)` when neither tier holds a value. A persisted value
    /// has all whitespace stripped; an empty record counts as missing.
    pub async fn read(&self, name: SecretName) -> Result<Option<SecretString>> {
        if let Some(value) = self.memory.get(&name).await {
            trace!("Credential cache hit for {}", name);
            self.record_lookup(name, true);
            return Ok(Some(value));
        }
        self.record_lookup(name, false);

        let Some(raw) = self.persistence.load(name).await? else {
            debug!("No persisted {} found", name);
            return Ok(None);
        };
        let value = strip_whitespace(&raw);
        if value.is_empty() {
            debug!("Persisted {} is empty, ignoring it", name);
            return Ok(None);
        }

        let value = SecretString::new(value);
        self.memory.insert(name, value.clone()).await;
        self.stats.record_insertion();
        debug!("Loaded persisted {} into memory", name);
        Ok(Some(value))
    }

    /// Write a secret to memory, then persist it
    ///
    /// The memory value stays usable when persisting fails; the failure is
    /// still returned.
    pub async fn write(&self, name: SecretName, value: SecretString) -> Result<()> {
        let raw = value.expose_secret().clone();
        self.memory.insert(name, value).await;
        self.stats.record_insertion();

        if let Err(e) = self.persistence.store(name, &raw).await {
            warn!("Failed to persist {}: {}", name, e);
            self.stats.record_persist_failure();
            return Err(e);
        }
        debug!("Persisted {}", name);
        Ok(())
    }

    /// Drop a secret from both tiers
    pub async fn invalidate(&self, name: SecretName) -> Result<()> {
        self.memory.invalidate(&name).await;
        self.persistence.remove(name).await
    }

    /// Drop every secret from both tiers
    pub async fn clear(&self) -> Result<()> {
        self.invalidate(SecretName::Frob).await?;
        self.invalidate(SecretName::Token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Persistence double that counts calls and can be told to fail writes
    #[derive(Debug, Default)]
    struct RecordingPersistence {
        loads: AtomicU64,
        stores: Mutex<Vec<(SecretName, String)>>,
        fail_store: bool,
    }

    #[async_trait]
    impl SecretPersistence for RecordingPersistence {
        async fn load(&self, _name: SecretName) -> Result<Option<String>> {
            let _ = self.loads.fetch_add(1, Ordering::Relaxed);
            Ok(None)
        }

        async fn store(&self, name: SecretName, value: &str) -> Result<()> {
            if self.fail_store {
                return Err(Error::storage(
                    name.as_str(),
                    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.stores.lock().unwrap().push((name, value.to_string()));
            Ok(())
        }

        async fn remove(&self, _name: SecretName) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_write_then_read_stays_in_memory() {
        let persistence = Arc::new(RecordingPersistence::default());
        let store = CredentialStore::new(persistence.clone());

        store
            .write(SecretName::Token, SecretString::new("T".to_string()))
            .await
            .unwrap();
        let value = store.read(SecretName::Token).await.unwrap().unwrap();

        assert_eq!(value.expose_secret(), "T");
        assert_eq!(persistence.loads.load(Ordering::Relaxed), 0);
        assert_eq!(store.stats().hits(), 1);
        assert_eq!(
            persistence.stores.lock().unwrap().as_slice(),
            &[(SecretName::Token, "T".to_string())]
        );
    }

    #[tokio::test]
    async fn test_persist_failure_keeps_memory_value() {
        let persistence = Arc::new(RecordingPersistence {
            fail_store: true,
            ..Default::default()
        });
        let store = CredentialStore::new(persistence);

        let err = store
            .write(SecretName::Frob, SecretString::new("F".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
        assert_eq!(store.stats().persist_failures(), 1);

        let value = store.read(SecretName::Frob).await.unwrap().unwrap();
        assert_eq!(value.expose_secret(), "F");
    }

    #[tokio::test]
    async fn test_read_missing_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("cache");
        let store = CredentialStore::with_dir(&dir);

        assert!(store.read(SecretName::Frob).await.unwrap().is_none());
        assert!(dir.is_dir());
        assert_eq!(store.stats().misses(), 1);
    }

    #[tokio::test]
    async fn test_persisted_value_is_trimmed_and_cached() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("token"), "  72157-abcdef\n").unwrap();
        let store = CredentialStore::with_dir(tmp.path());

        let first = store.read(SecretName::Token).await.unwrap().unwrap();
        assert_eq!(first.expose_secret(), "72157-abcdef");

        // the second read is served from memory even after the file is gone
        std::fs::remove_file(tmp.path().join("token")).unwrap();
        let second = store.read(SecretName::Token).await.unwrap().unwrap();
        assert_eq!(second.expose_secret(), "72157-abcdef");
        assert_eq!(store.stats().hits(), 1);
        assert_eq!(store.stats().misses(), 1);
    }

    #[tokio::test]
    async fn test_empty_record_counts_as_missing() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("frob"), "\n").unwrap();
        let store = CredentialStore::with_dir(tmp.path());

        assert!(store.read(SecretName::Frob).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_failure_is_distinct_from_missing() {
        let tmp = tempfile::tempdir().unwrap();
        // a directory where the token file should be makes the read fail
        std::fs::create_dir(tmp.path().join("token")).unwrap();
        let store = CredentialStore::with_dir(tmp.path());

        let err = store.read(SecretName::Token).await.unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }

    #[tokio::test]
    async fn test_write_persists_file_and_invalidate_removes_it() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CredentialStore::with_dir(tmp.path());

        store
            .write(SecretName::Token, SecretString::new("tok".to_string()))
            .await
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("token")).unwrap(),
            "tok"
        );

        store.invalidate(SecretName::Token).await.unwrap();
        assert!(!tmp.path().join("token").exists());
        assert!(store.read(SecretName::Token).await.unwrap().is_none());

        // clearing an already empty store is fine
        store.clear().await.unwrap();
    }

    #[test]
    fn test_cache_stats() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hits(), 2);
        assert_eq!(stats.misses(), 1);
        assert_eq!(stats.hit_rate(), 66.66666666666666);

        stats.reset();
        assert_eq!(stats.hits(), 0);
        assert_eq!(stats.misses(), 0);
    }

    #[test]
    fn test_secret_name() {
        assert_eq!(SecretName::Frob.as_str(), "frob");
        assert_eq!(SecretName::Token.to_string(), "token");
    }
}
