//! Eligibility: narrow the roster to checked-in players.

use crate::models::{Player, PlayerId};
use std::collections::HashSet;

/// Every roster player whose id is in `checked_in`, in roster order (not check-in order), so the
/// stable tie-break stays reproducible.
pub fn filter_eligible(roster: &[Player], checked_in: &HashSet<PlayerId>) -> Vec<Player> {
    roster
        .iter()
        .filter(|p| checked_in.contains(&p.id))
        .cloned()
        .collect()
}
