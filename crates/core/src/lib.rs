//! Collaborator seams for shard registration.
//!
//! The backfill talks to four external systems:
//!
//! - [`MarkerStore`] - durable key-value store holding the completion marker
//! - [`ShardIndex`] - archive index shards are registered with
//! - [`ChainStateAccessor`] - on-chain sector lookups
//! - [`SectorManager`] - local sealed/unsealed state
//!
//! Their internals are not part of this workspace. Registration results
//! flow back as [`ShardResult`] values over a bounded channel.

mod error;
mod result;
mod traits;

pub use error::{ChainError, RegistrationError, SectorError, StoreError};
pub use result::ShardResult;
pub use traits::{ChainStateAccessor, MarkerStore, SectorManager, ShardIndex};
