//! Marker store backends.
//!
//! - [`RocksMarkerStore`] - RocksDB, used by a running node
//! - [`MemoryMarkerStore`] - in-process map for tests and development

mod memory;
mod rocks;

pub use memory::MemoryMarkerStore;
pub use rocks::RocksMarkerStore;
