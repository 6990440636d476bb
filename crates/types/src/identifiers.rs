//! Provider and sector identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sector number, unique per storage provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorNumber(pub u64);

impl fmt::Display for SectorNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sector({})", self.0)
    }
}

/// Numeric on-chain actor identity of a storage provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u64);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f0{}", self.0)
    }
}

/// On-chain address of a storage provider.
///
/// Only ID addresses map directly onto an [`ActorId`]. Key and actor
/// addresses must be resolved on chain first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderAddress {
    /// `f0`-style ID address.
    Id(ActorId),
    /// Any non-ID address, kept in its textual form.
    Other(String),
}

impl ProviderAddress {
    /// Resolve the numeric actor id, if this is an ID address.
    pub fn actor_id(&self) -> Result<ActorId, AddressError> {
        match self {
            ProviderAddress::Id(id) => Ok(*id),
            ProviderAddress::Other(addr) => Err(AddressError::NotIdAddress(addr.clone())),
        }
    }
}

impl From<ActorId> for ProviderAddress {
    fn from(id: ActorId) -> Self {
        ProviderAddress::Id(id)
    }
}

impl fmt::Display for ProviderAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderAddress::Id(id) => write!(f, "{}", id),
            ProviderAddress::Other(addr) => write!(f, "{}", addr),
        }
    }
}

/// Errors converting a provider address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("address {0} is not an ID address")]
    NotIdAddress(String),
}

/// Seal proof type a sector was sealed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisteredSealProof {
    StackedDrg2KiBV1_1,
    StackedDrg8MiBV1_1,
    StackedDrg512MiBV1_1,
    StackedDrg32GiBV1_1,
    StackedDrg64GiBV1_1,
}

/// Globally unique sector identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorId {
    pub miner: ActorId,
    pub number: SectorNumber,
}

/// Reference to a physical sector, as understood by the sector manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorRef {
    pub id: SectorId,
    pub proof_type: RegisteredSealProof,
}

/// On-chain sector information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorOnChainInfo {
    pub sector_number: SectorNumber,
    pub seal_proof: RegisteredSealProof,
}

/// Tipset key selecting the chain state to query.
///
/// The empty key means "current chain head".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TipSetKey(Vec<String>);

impl TipSetKey {
    /// The chain head.
    pub const EMPTY: Self = TipSetKey(Vec::new());

    /// Build a key from block identifiers.
    pub fn new(blocks: Vec<String>) -> Self {
        Self(blocks)
    }

    /// Whether this key refers to the chain head.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Byte offset within a sector, in unpadded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnpaddedByteIndex(pub u64);

/// Piece size, in unpadded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnpaddedPieceSize(pub u64);
