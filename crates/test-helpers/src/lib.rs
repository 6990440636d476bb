//! Test helpers for shard registration.
//!
//! Scriptable fakes for every collaborator trait plus deal fixtures. Each
//! fake records the calls it receives so tests can assert on what the
//! migrator did, not just what it returned.

mod fixtures;
mod index;
mod sectors;
mod store;

pub use fixtures::{deal, deal_without_piece, piece};
pub use index::{Delivery, RecordingShardIndex, RegisterCall};
pub use sectors::{ScriptedChainState, ScriptedSectorManager};
pub use store::{FlakyMarkerStore, StoreFaults};
