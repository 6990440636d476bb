//! Error types reported by external collaborators.

use thiserror::Error;

/// Errors from the durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing engine rejected the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the chain state accessor.
#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("Sector {0} not found on chain")]
    SectorNotFound(u64),

    #[error("Chain query failed: {0}")]
    Query(String),
}

/// Errors from the sector manager.
#[derive(Debug, Clone, Error)]
pub enum SectorError {
    #[error("Sector not stored locally: {0}")]
    NotFound(String),

    #[error("Sector manager error: {0}")]
    Manager(String),
}

/// Errors from shard registration, either at submission or in the
/// asynchronously delivered result.
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// The request was rejected before being queued.
    #[error("Invalid registration request: {0}")]
    InvalidRequest(String),

    /// A shard with this key is already registered.
    #[error("Shard already registered: {0}")]
    AlreadyRegistered(String),

    /// The index store failed while registering the shard.
    #[error("Shard registration failed: {0}")]
    Failed(String),
}
