//! Marker store with failure injection.

use async_trait::async_trait;
use shardreg_core::{MarkerStore, StoreError};
use shardreg_store::MemoryMarkerStore;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Which marker store operations fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreFaults {
    pub has: bool,
    pub put: bool,
    pub sync: bool,
}

/// In-memory marker store that can be told to fail, and counts operations.
#[derive(Default)]
pub struct FlakyMarkerStore {
    inner: MemoryMarkerStore,
    faults: StoreFaults,
    puts: AtomicUsize,
    syncs: AtomicUsize,
}

impl FlakyMarkerStore {
    pub fn new(inner: MemoryMarkerStore, faults: StoreFaults) -> Self {
        Self {
            inner,
            faults,
            puts: AtomicUsize::new(0),
            syncs: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &MemoryMarkerStore {
        &self.inner
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    pub fn sync_count(&self) -> usize {
        self.syncs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarkerStore for FlakyMarkerStore {
    async fn has(&self, key: &str) -> Result<bool, StoreError> {
        if self.faults.has {
            return Err(StoreError::Backend("injected read failure".into()));
        }
        self.inner.has(key).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.faults.put {
            return Err(StoreError::Backend("injected write failure".into()));
        }
        self.inner.put(key, value).await
    }

    async fn sync(&self, key: &str) -> Result<(), StoreError> {
        self.syncs.fetch_add(1, Ordering::SeqCst);
        if self.faults.sync {
            return Err(StoreError::Backend("injected sync failure".into()));
        }
        self.inner.sync(key).await
    }
}
