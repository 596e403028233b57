//! Swiss pairings: adjacent players in the standings meet next round.

use crate::logic::standings::compute_standings;
use crate::models::{Pairing, PlayerStanding, Scope};
use crate::store::{Store, StoreError};

/// Pair standings positions 1-2, 3-4, ... With an odd count the last player is
/// left out; no bye is recorded. Earlier opponents are not considered.
pub fn swiss_pairings(standings: &[PlayerStanding]) -> Vec<Pairing> {
    let chunks = standings.chunks_exact(2);
    if let [left_out] = chunks.remainder() {
        log::debug!("Odd player count: {} ({}) is not paired", left_out.name, left_out.id);
    }
    chunks.map(|pair| Pairing::between(&pair[0], &pair[1])).collect()
}

/// Pairings for the next round in `scope`, based on current standings.
pub fn generate_pairings(store: &dyn Store, scope: Scope) -> Result<Vec<Pairing>, StoreError> {
    let standings = compute_standings(store, scope)?;
    Ok(swiss_pairings(&standings))
}
