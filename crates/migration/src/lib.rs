//! One-time shard registration backfill.
//!
//! Deals accepted before the archive index existed have no shard in it, so
//! they cannot be retrieved through the index. On startup the
//! [`ShardMigrator`] registers every such deal as a shard, once: a durable
//! marker records that the backfill ran and later starts skip it.
//!
//! # Flow
//!
//! ```text
//! marker present? ──yes──▶ AlreadyMigrated
//!       │ no
//!       ▼
//! spawn ResultDrain ◀──────────── ShardResult (async, unordered)
//!       │                                    ▲
//!       ▼                                    │
//! for each eligible deal:                    │
//!     probe seal state (failure => sealed)   │
//!     ShardIndex::register_shard ────────────┘
//!       │
//!       ▼
//! report dispatched total to drain
//! await drain (unless detached)
//! write + sync marker (failures logged)
//! ```
//!
//! # Components
//!
//! - [`ShardMigrator`] - runs the backfill
//! - [`SealStateProbe`] - sealed/unsealed lookup per sector
//! - [`ResultDrain`] / [`DrainFeed`] - result aggregation with a late total
//! - [`MigrationConfig`] - marker key, channel capacity, drain awaiting

mod config;
mod drain;
mod error;
mod filter;
mod migrator;
mod probe;
mod report;

pub use config::{MigrationConfig, DEFAULT_MARKER_KEY};
pub use drain::{channel as drain_channel, DrainFeed, DrainSummary, ResultDrain};
pub use error::{MigrationError, ProbeError};
pub use filter::{eligible_deals, eligible_piece};
pub use migrator::{ShardMigrator, MARKER_VALUE};
pub use probe::{SealStateProbe, PROBE_OFFSET, PROBE_SIZE, UNSEALED_ON_PROBE_FAILURE};
pub use report::{MigrationReport, MigrationStats};
