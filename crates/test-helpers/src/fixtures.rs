//! Deal fixtures.

use shardreg_types::{DataRef, DealState, MinerDeal, PieceCid, SectorNumber};
use std::path::PathBuf;

/// Deterministic piece CID for a short label.
pub fn piece(label: &str) -> PieceCid {
    PieceCid::from_data(label.as_bytes())
}

/// A deal carrying a piece CID derived from `label`.
///
/// The archive path is `/deals/<label>.car`.
pub fn deal(label: &str, sector: u64, state: DealState) -> MinerDeal {
    MinerDeal {
        data_ref: DataRef {
            piece_cid: Some(piece(label)),
        },
        sector_number: SectorNumber(sector),
        state,
        car_file_path: PathBuf::from(format!("/deals/{}.car", label)),
    }
}

/// A deal that predates content addressing.
pub fn deal_without_piece(sector: u64, state: DealState) -> MinerDeal {
    MinerDeal {
        data_ref: DataRef { piece_cid: None },
        sector_number: SectorNumber(sector),
        state,
        car_file_path: PathBuf::from(format!("/deals/legacy-{}.car", sector)),
    }
}
