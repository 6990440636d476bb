//! Scripted chain state and sector manager.

use async_trait::async_trait;
use shardreg_core::{ChainError, ChainStateAccessor, SectorError, SectorManager};
use shardreg_types::{
    ProviderAddress, RegisteredSealProof, SectorNumber, SectorOnChainInfo, SectorRef, TipSetKey,
    UnpaddedByteIndex, UnpaddedPieceSize,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Chain state that knows a fixed set of sectors.
///
/// Unknown sectors fail with [`ChainError::SectorNotFound`]. Every lookup is
/// recorded.
#[derive(Default)]
pub struct ScriptedChainState {
    sectors: HashMap<SectorNumber, RegisteredSealProof>,
    lookups: Mutex<Vec<(ProviderAddress, SectorNumber, TipSetKey)>>,
}

impl ScriptedChainState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sector(mut self, sector: u64, proof: RegisteredSealProof) -> Self {
        self.sectors.insert(SectorNumber(sector), proof);
        self
    }

    pub fn lookups(&self) -> Vec<(ProviderAddress, SectorNumber, TipSetKey)> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.lock().unwrap().len()
    }
}

#[async_trait]
impl ChainStateAccessor for ScriptedChainState {
    async fn sector_info(
        &self,
        provider: &ProviderAddress,
        sector: SectorNumber,
        tipset: &TipSetKey,
    ) -> Result<SectorOnChainInfo, ChainError> {
        self.lookups
            .lock()
            .unwrap()
            .push((provider.clone(), sector, tipset.clone()));

        self.sectors
            .get(&sector)
            .map(|&seal_proof| SectorOnChainInfo {
                sector_number: sector,
                seal_proof,
            })
            .ok_or(ChainError::SectorNotFound(sector.0))
    }
}

/// Sector manager with scripted unsealed state.
///
/// Sectors default to sealed; sectors in the error set fail the query.
#[derive(Default)]
pub struct ScriptedSectorManager {
    unsealed: HashSet<SectorNumber>,
    broken: HashSet<SectorNumber>,
    queries: Mutex<Vec<(SectorRef, UnpaddedByteIndex, UnpaddedPieceSize)>>,
}

impl ScriptedSectorManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unsealed(mut self, sector: u64) -> Self {
        self.unsealed.insert(SectorNumber(sector));
        self
    }

    pub fn with_error(mut self, sector: u64) -> Self {
        self.broken.insert(SectorNumber(sector));
        self
    }

    pub fn queries(&self) -> Vec<(SectorRef, UnpaddedByteIndex, UnpaddedPieceSize)> {
        self.queries.lock().unwrap().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl SectorManager for ScriptedSectorManager {
    async fn is_unsealed(
        &self,
        sector: SectorRef,
        offset: UnpaddedByteIndex,
        size: UnpaddedPieceSize,
    ) -> Result<bool, SectorError> {
        self.queries.lock().unwrap().push((sector, offset, size));

        let number = sector.id.number;
        if self.broken.contains(&number) {
            return Err(SectorError::Manager(format!("scripted failure for {}", number)));
        }
        Ok(self.unsealed.contains(&number))
    }
}
