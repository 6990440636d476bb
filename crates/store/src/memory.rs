use async_trait::async_trait;
use shardreg_core::{MarkerStore, StoreError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory marker store for testing and development.
///
/// `sync` is a no-op; clones share the same map so a "restart" can be
/// simulated by building a second migrator over a clone.
#[derive(Clone, Default)]
pub struct MemoryMarkerStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read back a stored value.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.read().await.get(key).cloned()
    }
}

#[async_trait]
impl MarkerStore for MemoryMarkerStore {
    async fn has(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.read().await.contains_key(key))
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn sync(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_then_has() {
        let store = MemoryMarkerStore::new();
        assert!(!store.has("k").await.unwrap());

        store.put("k", &[1]).await.unwrap();
        store.sync("k").await.unwrap();

        assert!(store.has("k").await.unwrap());
        assert_eq!(store.get("k").await, Some(vec![1]));
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryMarkerStore::new();
        let other = store.clone();
        store.put("k", &[]).await.unwrap();
        assert!(other.has("k").await.unwrap());
    }
}
