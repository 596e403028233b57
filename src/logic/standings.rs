//! Standings: aggregate recorded matches into a ranked list.

use crate::models::{GameMatch, MatchOutcome, Player, PlayerId, PlayerStanding, Scope};
use crate::store::{Store, StoreError};
use std::collections::HashMap;

/// Aggregate matches into standings for the given players.
///
/// 1. Every player starts at 0 wins, 0 ties, 0 matches.
/// 2. Each match is applied once: decisive adds a win to the winner and a loss to
///    the loser, a tie adds a tie to both.
/// 3. Stable sort by points, highest first; equal points keep the input order.
///
/// Matches involving players not in `players` only count for those who are.
pub fn tally(players: &[Player], matches: &[GameMatch]) -> Vec<PlayerStanding> {
    let mut standings: Vec<PlayerStanding> = players.iter().map(PlayerStanding::for_player).collect();
    let index: HashMap<PlayerId, usize> = standings
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id, i))
        .collect();

    for m in matches {
        match m.outcome {
            MatchOutcome::Decisive { winner, loser } => {
                if let Some(&i) = index.get(&winner) {
                    standings[i].add_win();
                }
                if let Some(&i) = index.get(&loser) {
                    standings[i].add_loss();
                }
            }
            MatchOutcome::Tie { first, second } => {
                for pid in [first, second] {
                    if let Some(&i) = index.get(&pid) {
                        standings[i].add_tie();
                    }
                }
            }
        }
    }

    standings.sort_by(|a, b| b.points().cmp(&a.points()));
    standings
}

/// Current standings for `scope`, highest points first. Every player in scope is
/// listed, including those with no matches.
pub fn compute_standings(store: &dyn Store, scope: Scope) -> Result<Vec<PlayerStanding>, StoreError> {
    let standings = store.standings(scope)?;
    log::debug!("Computed standings for {} ({} players)", scope, standings.len());
    Ok(standings)
}
