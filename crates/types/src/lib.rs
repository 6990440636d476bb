//! Core types for shard registration.
//!
//! Deals, piece CIDs and the sector identities the seal-state probe works
//! with. These types carry no behaviour beyond construction and formatting.

mod cid;
mod deal;
mod identifiers;

pub use cid::{CidParseError, PieceCid};
pub use deal::{DataRef, DealState, EligibleStateSet, MinerDeal};
pub use identifiers::{
    ActorId, AddressError, ProviderAddress, RegisteredSealProof, SectorId, SectorNumber,
    SectorOnChainInfo, SectorRef, TipSetKey, UnpaddedByteIndex, UnpaddedPieceSize,
};
