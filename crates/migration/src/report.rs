//! Outcome of a migration run.

use crate::DrainSummary;

/// What a call to `register_shards` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationReport {
    /// The marker was already present; nothing was inspected.
    AlreadyMigrated,
    /// Deals were processed and the marker write was attempted.
    Completed(MigrationStats),
}

impl MigrationReport {
    /// Stats of a completed run.
    pub fn stats(&self) -> Option<&MigrationStats> {
        match self {
            MigrationReport::AlreadyMigrated => None,
            MigrationReport::Completed(stats) => Some(stats),
        }
    }
}

/// Counters for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationStats {
    /// Deals passed in.
    pub deals_seen: usize,
    /// Deals that passed the filter.
    pub eligible: usize,
    /// Registrations accepted by the index.
    pub dispatched: usize,
    /// Registrations the index rejected at submission.
    pub submission_failures: usize,
    /// Eligible deals whose seal state could not be determined.
    pub probe_failures: usize,
    /// Eligible deals registered with eager index construction.
    pub unsealed: usize,
    /// Whether the marker was both written and synced.
    pub marker_persisted: bool,
    /// Drain totals, when the run waited for the drain.
    pub drain: Option<DrainSummary>,
}
