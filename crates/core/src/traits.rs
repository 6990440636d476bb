//! Collaborator traits.
//!
//! Everything the backfill touches outside of its own memory goes through
//! one of these traits. Production wiring supplies real implementations;
//! tests supply fakes from `shardreg-test-helpers`.

use crate::{ChainError, RegistrationError, SectorError, ShardResult, StoreError};
use async_trait::async_trait;
use shardreg_types::{
    PieceCid, ProviderAddress, SectorNumber, SectorOnChainInfo, SectorRef, TipSetKey,
    UnpaddedByteIndex, UnpaddedPieceSize,
};
use std::path::Path;
use tokio::sync::mpsc;

/// Durable key-value store holding the migration marker.
#[async_trait]
pub trait MarkerStore: Send + Sync {
    /// Check whether a key is present.
    async fn has(&self, key: &str) -> Result<bool, StoreError>;

    /// Store a value under a key.
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Flush the given key (and anything written before it) to durable media.
    async fn sync(&self, key: &str) -> Result<(), StoreError>;
}

/// Archive index that serves shards keyed by piece CID.
#[async_trait]
pub trait ShardIndex: Send + Sync {
    /// Submit a shard registration.
    ///
    /// Returns once the request is queued. Exactly one [`ShardResult`] is
    /// later delivered on `results` for every call that returns `Ok`; calls
    /// that return `Err` deliver nothing.
    ///
    /// With `eager_init` the index is built immediately, otherwise it is
    /// built on first retrieval.
    async fn register_shard(
        &self,
        piece: PieceCid,
        car_path: &Path,
        eager_init: bool,
        results: mpsc::Sender<ShardResult>,
    ) -> Result<(), RegistrationError>;
}

/// Read access to on-chain state.
#[async_trait]
pub trait ChainStateAccessor: Send + Sync {
    /// Look up a provider's sector at the given tipset.
    async fn sector_info(
        &self,
        provider: &ProviderAddress,
        sector: SectorNumber,
        tipset: &TipSetKey,
    ) -> Result<SectorOnChainInfo, ChainError>;
}

/// Local sector storage.
#[async_trait]
pub trait SectorManager: Send + Sync {
    /// Whether an unsealed copy of the given range is available.
    async fn is_unsealed(
        &self,
        sector: SectorRef,
        offset: UnpaddedByteIndex,
        size: UnpaddedPieceSize,
    ) -> Result<bool, SectorError>;
}
