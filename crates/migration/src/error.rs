//! Error types for the backfill.

use shardreg_core::{ChainError, SectorError, StoreError};
use shardreg_types::{AddressError, SectorNumber};
use thiserror::Error;

/// Errors that abort a migration run.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The completion marker could not be read.
    #[error("failed to get shard registration status: {0}")]
    MarkerRead(#[source] StoreError),
}

/// Errors determining whether a sector is unsealed.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to get {sector} info: {source}")]
    SectorInfo {
        sector: SectorNumber,
        #[source]
        source: ChainError,
    },

    #[error("failed to convert provider address to ID address: {0}")]
    ProviderAddress(#[from] AddressError),

    #[error("failed to check if {sector} is unsealed: {source}")]
    UnsealedCheck {
        sector: SectorNumber,
        #[source]
        source: SectorError,
    },
}
