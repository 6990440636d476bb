//! Deal eligibility.
//!
//! Deals not yet handed off to the sealing subsystem are skipped here; they
//! get registered by the deal state machine once they reach that point.

use shardreg_types::{EligibleStateSet, MinerDeal, PieceCid};

/// Piece CID of the deal, if the deal should be registered as a shard.
///
/// A deal qualifies when it has a piece CID and its state is in `eligible`.
pub fn eligible_piece(deal: &MinerDeal, eligible: &EligibleStateSet) -> Option<PieceCid> {
    let piece = deal.piece_cid()?;
    eligible.contains(deal.state).then_some(piece)
}

/// Deals to register, paired with their piece CID.
pub fn eligible_deals<'a>(
    deals: &'a [MinerDeal],
    eligible: &'a EligibleStateSet,
) -> impl Iterator<Item = (PieceCid, &'a MinerDeal)> + 'a {
    deals
        .iter()
        .filter_map(move |deal| eligible_piece(deal, eligible).map(|piece| (piece, deal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shardreg_test_helpers::{deal, deal_without_piece, piece};
    use shardreg_types::DealState;

    #[test]
    fn test_missing_piece_is_skipped() {
        let set = EligibleStateSet::sealing_subsystem();
        assert_eq!(
            eligible_piece(&deal_without_piece(1, DealState::Active), &set),
            None
        );
    }

    #[test]
    fn test_state_outside_set_is_skipped() {
        let set: EligibleStateSet = [DealState::Sealing].into_iter().collect();
        assert_eq!(
            eligible_piece(&deal("a", 1, DealState::FundsReserved), &set),
            None
        );
        assert_eq!(
            eligible_piece(&deal("a", 1, DealState::Sealing), &set),
            Some(piece("a"))
        );
    }

    #[test]
    fn test_mixed_deals() {
        let set: EligibleStateSet = [DealState::Sealing].into_iter().collect();
        let deals = vec![
            deal("A", 1, DealState::Sealing),
            deal_without_piece(2, DealState::Sealing),
            deal("B", 3, DealState::FundsReserved),
        ];

        let selected: Vec<_> = eligible_deals(&deals, &set).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].0, piece("A"));
        assert_eq!(selected[0].1.sector_number.0, 1);
    }

    #[test]
    fn test_each_deal_judged_independently() {
        let set = EligibleStateSet::sealing_subsystem();
        let mut deals: Vec<_> = DealState::KNOWN_BY_SEALING_SUBSYSTEM
            .iter()
            .enumerate()
            .map(|(i, &state)| deal(&format!("p{}", i), i as u64, state))
            .collect();
        deals.push(deal("rejected", 99, DealState::Rejecting));
        deals.push(deal_without_piece(100, DealState::Active));

        let forward: Vec<_> = eligible_deals(&deals, &set).map(|(p, _)| p).collect();
        deals.reverse();
        let mut backward: Vec<_> = eligible_deals(&deals, &set).map(|(p, _)| p).collect();
        backward.reverse();

        assert_eq!(forward.len(), DealState::KNOWN_BY_SEALING_SUBSYSTEM.len());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_empty_set_selects_nothing() {
        let set: EligibleStateSet = std::iter::empty().collect();
        let deals = vec![deal("a", 1, DealState::Active)];
        assert_eq!(eligible_deals(&deals, &set).count(), 0);
    }
}
