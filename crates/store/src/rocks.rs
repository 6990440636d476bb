use async_trait::async_trait;
use rocksdb::{Options, DB};
use shardreg_core::{MarkerStore, StoreError};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// RocksDB-backed marker store.
///
/// Writes go to the memtable and WAL without fsync; `sync` fsyncs the WAL
/// so that everything written so far survives a crash.
pub struct RocksMarkerStore {
    db: Arc<DB>,
}

impl RocksMarkerStore {
    /// Open (or create) a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        Self::with_options(path, opts)
    }

    pub fn with_options<P: AsRef<Path>>(path: P, opts: Options) -> Result<Self, StoreError> {
        let db = DB::open(&opts, path.as_ref())
            .map_err(|e| StoreError::Backend(format!("Failed to open RocksDB: {}", e)))?;
        debug!(path = %path.as_ref().display(), "opened marker store");

        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl MarkerStore for RocksMarkerStore {
    async fn has(&self, key: &str) -> Result<bool, StoreError> {
        self.db
            .get(key.as_bytes())
            .map(|v| v.is_some())
            .map_err(|e| StoreError::Backend(format!("RocksDB get error: {}", e)))
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.db
            .put(key.as_bytes(), value)
            .map_err(|e| StoreError::Backend(format!("RocksDB put error: {}", e)))
    }

    async fn sync(&self, _key: &str) -> Result<(), StoreError> {
        // RocksDB has no per-key sync; fsync the whole WAL.
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || db.flush_wal(true))
            .await
            .map_err(|e| StoreError::Backend(format!("WAL sync task failed: {}", e)))?
            .map_err(|e| StoreError::Backend(format!("RocksDB WAL sync error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_marker_survives_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let store = RocksMarkerStore::open(dir.path()).unwrap();
            assert!(!store.has("shards-registered").await.unwrap());
            store.put("shards-registered", &[1]).await.unwrap();
            store.sync("shards-registered").await.unwrap();
        }

        let store = RocksMarkerStore::open(dir.path()).unwrap();
        assert!(store.has("shards-registered").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_value_still_counts_as_present() {
        let dir = TempDir::new().unwrap();
        let store = RocksMarkerStore::open(dir.path()).unwrap();
        store.put("k", &[]).await.unwrap();
        assert!(store.has("k").await.unwrap());
    }
}
