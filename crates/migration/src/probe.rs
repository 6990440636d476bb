//! Seal-state probe.
//!
//! Every piece in a sector shares the sector's sealed/unsealed state, so a
//! single representative byte range answers the question for all of them.

use crate::ProbeError;
use shardreg_core::{ChainStateAccessor, SectorManager};
use shardreg_types::{
    ProviderAddress, SectorId, SectorNumber, SectorRef, TipSetKey, UnpaddedByteIndex,
    UnpaddedPieceSize,
};
use std::sync::Arc;

/// Unsealed hint used when the probe fails.
///
/// Sealed means the shard is registered with lazy index construction.
pub const UNSEALED_ON_PROBE_FAILURE: bool = false;

/// Offset of the byte range queried on the sector manager.
pub const PROBE_OFFSET: UnpaddedByteIndex = UnpaddedByteIndex(0);

/// Length of the byte range queried on the sector manager.
pub const PROBE_SIZE: UnpaddedPieceSize = UnpaddedPieceSize(1);

/// Answers "is this sector unsealed?" for the local provider.
pub struct SealStateProbe {
    provider: ProviderAddress,
    chain: Arc<dyn ChainStateAccessor>,
    sectors: Arc<dyn SectorManager>,
}

impl SealStateProbe {
    pub fn new(
        provider: ProviderAddress,
        chain: Arc<dyn ChainStateAccessor>,
        sectors: Arc<dyn SectorManager>,
    ) -> Self {
        Self {
            provider,
            chain,
            sectors,
        }
    }

    /// Check whether an unsealed copy of the sector is available.
    pub async fn is_unsealed(&self, sector: SectorNumber) -> Result<bool, ProbeError> {
        let info = self
            .chain
            .sector_info(&self.provider, sector, &TipSetKey::EMPTY)
            .await
            .map_err(|source| ProbeError::SectorInfo { sector, source })?;

        let miner = self.provider.actor_id()?;

        let sector_ref = SectorRef {
            id: SectorId {
                miner,
                number: sector,
            },
            proof_type: info.seal_proof,
        };

        self.sectors
            .is_unsealed(sector_ref, PROBE_OFFSET, PROBE_SIZE)
            .await
            .map_err(|source| ProbeError::UnsealedCheck { sector, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardreg_test_helpers::{ScriptedChainState, ScriptedSectorManager};
    use shardreg_types::{ActorId, RegisteredSealProof};

    const PROOF: RegisteredSealProof = RegisteredSealProof::StackedDrg32GiBV1_1;

    fn probe(
        provider: ProviderAddress,
        chain: ScriptedChainState,
        sectors: ScriptedSectorManager,
    ) -> (SealStateProbe, Arc<ScriptedChainState>, Arc<ScriptedSectorManager>) {
        let chain = Arc::new(chain);
        let sectors = Arc::new(sectors);
        let probe = SealStateProbe::new(provider, chain.clone(), sectors.clone());
        (probe, chain, sectors)
    }

    #[tokio::test]
    async fn test_unsealed_sector() {
        let (probe, chain, sectors) = probe(
            ActorId(1000).into(),
            ScriptedChainState::new().with_sector(7, PROOF),
            ScriptedSectorManager::new().with_unsealed(7),
        );

        assert!(probe.is_unsealed(SectorNumber(7)).await.unwrap());

        let lookups = chain.lookups();
        assert_eq!(lookups.len(), 1);
        assert_eq!(lookups[0].0, ProviderAddress::Id(ActorId(1000)));
        assert!(lookups[0].2.is_empty());

        let (sector_ref, offset, size) = sectors.queries()[0];
        assert_eq!(sector_ref.id.miner, ActorId(1000));
        assert_eq!(sector_ref.id.number, SectorNumber(7));
        assert_eq!(sector_ref.proof_type, PROOF);
        assert_eq!(offset, PROBE_OFFSET);
        assert_eq!(size, PROBE_SIZE);
    }

    #[tokio::test]
    async fn test_sealed_sector() {
        let (probe, _, _) = probe(
            ActorId(1000).into(),
            ScriptedChainState::new().with_sector(7, PROOF),
            ScriptedSectorManager::new(),
        );
        assert!(!probe.is_unsealed(SectorNumber(7)).await.unwrap());
    }

    #[tokio::test]
    async fn test_chain_lookup_failure() {
        let (probe, _, sectors) = probe(
            ActorId(1000).into(),
            ScriptedChainState::new(),
            ScriptedSectorManager::new().with_unsealed(7),
        );

        let err = probe.is_unsealed(SectorNumber(7)).await.unwrap_err();
        assert!(matches!(err, ProbeError::SectorInfo { sector, .. } if sector == SectorNumber(7)));
        assert_eq!(sectors.query_count(), 0);
    }

    #[tokio::test]
    async fn test_non_id_provider_address() {
        let (probe, _, sectors) = probe(
            ProviderAddress::Other("f3provider".into()),
            ScriptedChainState::new().with_sector(7, PROOF),
            ScriptedSectorManager::new().with_unsealed(7),
        );

        let err = probe.is_unsealed(SectorNumber(7)).await.unwrap_err();
        assert!(matches!(err, ProbeError::ProviderAddress(_)));
        assert_eq!(sectors.query_count(), 0);
    }

    #[tokio::test]
    async fn test_sector_manager_failure() {
        let (probe, _, _) = probe(
            ActorId(1000).into(),
            ScriptedChainState::new().with_sector(7, PROOF),
            ScriptedSectorManager::new().with_error(7),
        );

        let err = probe.is_unsealed(SectorNumber(7)).await.unwrap_err();
        assert!(matches!(err, ProbeError::UnsealedCheck { .. }));
    }
}
