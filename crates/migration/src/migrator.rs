//! The shard registration backfill.

use crate::drain;
use crate::filter::eligible_deals;
use crate::probe::{SealStateProbe, UNSEALED_ON_PROBE_FAILURE};
use crate::{DrainFeed, MigrationConfig, MigrationError, MigrationReport, MigrationStats};
use shardreg_core::{ChainStateAccessor, MarkerStore, SectorManager, ShardIndex};
use shardreg_types::{EligibleStateSet, MinerDeal, ProviderAddress};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Value written under the marker key. Only the key's presence is checked.
pub const MARKER_VALUE: [u8; 1] = [1];

/// Registers deals that are already with the sealing subsystem as shards in
/// the archive index.
///
/// Runs once per node: after a run completes the marker is persisted and
/// every later call returns [`MigrationReport::AlreadyMigrated`]. From then
/// on the deal state machine registers shards itself.
pub struct ShardMigrator {
    config: MigrationConfig,
    store: Arc<dyn MarkerStore>,
    index: Arc<dyn ShardIndex>,
    probe: SealStateProbe,
    eligible: EligibleStateSet,
}

impl ShardMigrator {
    /// Create a migrator for the given provider with the default config and
    /// the states known by the sealing subsystem.
    pub fn new(
        provider: ProviderAddress,
        store: Arc<dyn MarkerStore>,
        index: Arc<dyn ShardIndex>,
        chain: Arc<dyn ChainStateAccessor>,
        sectors: Arc<dyn SectorManager>,
    ) -> Self {
        Self {
            config: MigrationConfig::default(),
            store,
            index,
            probe: SealStateProbe::new(provider, chain, sectors),
            eligible: EligibleStateSet::sealing_subsystem(),
        }
    }

    pub fn with_config(mut self, config: MigrationConfig) -> Self {
        self.config = config;
        self
    }

    /// Override which deal states are registered.
    pub fn with_eligible_states(mut self, eligible: EligibleStateSet) -> Self {
        self.eligible = eligible;
        self
    }

    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Whether a previous run already completed.
    pub async fn already_migrated(&self) -> Result<bool, MigrationError> {
        self.store
            .has(&self.config.marker_key)
            .await
            .map_err(MigrationError::MarkerRead)
    }

    /// Register all eligible deals as shards, unless that already happened.
    ///
    /// Only a failure to read the marker is returned as an error. Probe,
    /// submission, registration and marker write failures are logged and
    /// counted in the returned stats.
    pub async fn register_shards(
        &self,
        deals: &[MinerDeal],
    ) -> Result<MigrationReport, MigrationError> {
        if self.already_migrated().await? {
            debug!("all deals already registered as shards");
            return Ok(MigrationReport::AlreadyMigrated);
        }

        info!(deals = deals.len(), "registering deals as shards");

        // The drain has to be consuming before the first dispatch.
        let (feed, result_drain) = drain::channel(self.config.result_buffer);
        let drain_task = result_drain.spawn();

        let mut stats = MigrationStats {
            deals_seen: deals.len(),
            ..Default::default()
        };
        self.dispatch(deals, &feed, &mut stats).await;

        feed.finish(stats.dispatched);

        if self.config.await_drain {
            match drain_task.await {
                Ok(summary) => stats.drain = Some(summary),
                Err(e) => error!(error = %e, "shard result drain task failed"),
            }
        }

        stats.marker_persisted = self.mark_complete().await;

        info!(
            eligible = stats.eligible,
            dispatched = stats.dispatched,
            submission_failures = stats.submission_failures,
            probe_failures = stats.probe_failures,
            "shard registration migration complete"
        );
        Ok(MigrationReport::Completed(stats))
    }

    async fn dispatch(&self, deals: &[MinerDeal], feed: &DrainFeed, stats: &mut MigrationStats) {
        for (piece, deal) in eligible_deals(deals, &self.eligible) {
            stats.eligible += 1;

            let unsealed = match self.probe.is_unsealed(deal.sector_number).await {
                Ok(unsealed) => unsealed,
                Err(e) => {
                    stats.probe_failures += 1;
                    error!(
                        piece = %piece,
                        sector = %deal.sector_number,
                        error = %e,
                        "failed to get unsealed state of deal"
                    );
                    UNSEALED_ON_PROBE_FAILURE
                }
            };

            // Unsealed shards get their index built now; sealed ones are
            // indexed lazily once unsealed for a retrieval.
            if let Err(e) = self
                .index
                .register_shard(piece, &deal.car_file_path, unsealed, feed.results())
                .await
            {
                stats.submission_failures += 1;
                warn!(piece = %piece, error = %e, "failed to register shard for deal");
                continue;
            }

            if unsealed {
                stats.unsealed += 1;
            }
            stats.dispatched += 1;
        }
    }

    /// Write and sync the marker. Returns whether both succeeded.
    async fn mark_complete(&self) -> bool {
        let key = self.config.marker_key.as_str();
        let mut persisted = true;

        if let Err(e) = self.store.put(key, &MARKER_VALUE).await {
            error!(key, error = %e, "failed to mark shards as registered");
            persisted = false;
        }

        if let Err(e) = self.store.sync(key).await {
            error!(key, error = %e, "failed to sync shards as registered");
            persisted = false;
        }

        persisted
    }
}
