//! Storage deals as recorded by the provider.

use crate::{PieceCid, SectorNumber};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

/// Processing state of a provider-side storage deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DealState {
    Unknown,
    Validating,
    AcceptWait,
    WaitingForData,
    Transferring,
    VerifyData,
    ReserveProviderFunds,
    ProviderFunding,
    FundsReserved,
    Publish,
    Publishing,
    Staged,
    AwaitingPreCommit,
    Sealing,
    Finalizing,
    Active,
    Expired,
    Slashed,
    Rejecting,
    Failing,
    Error,
}

impl DealState {
    /// States on the happy path after the deal has been handed off to the
    /// sealing subsystem.
    pub const KNOWN_BY_SEALING_SUBSYSTEM: [DealState; 7] = [
        DealState::Staged,
        DealState::AwaitingPreCommit,
        DealState::Sealing,
        DealState::Finalizing,
        DealState::Active,
        DealState::Expired,
        DealState::Slashed,
    ];
}

impl fmt::Display for DealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StorageDeal{:?}", self)
    }
}

/// Reference to the data a deal stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRef {
    /// Piece CID, absent for deals that predate content addressing.
    pub piece_cid: Option<PieceCid>,
}

/// A storage deal accepted by this provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinerDeal {
    pub data_ref: DataRef,
    pub sector_number: SectorNumber,
    pub state: DealState,
    /// Path of the CARv2 archive holding the deal data.
    pub car_file_path: PathBuf,
}

impl MinerDeal {
    /// Piece CID of the deal data, if known.
    pub fn piece_cid(&self) -> Option<PieceCid> {
        self.data_ref.piece_cid
    }
}

/// Set of deal states whose deals are eligible for shard registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleStateSet(HashSet<DealState>);

impl EligibleStateSet {
    /// States known by the sealing subsystem.
    pub fn sealing_subsystem() -> Self {
        DealState::KNOWN_BY_SEALING_SUBSYSTEM.into_iter().collect()
    }

    pub fn contains(&self, state: DealState) -> bool {
        self.0.contains(&state)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<DealState> for EligibleStateSet {
    fn from_iter<I: IntoIterator<Item = DealState>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
