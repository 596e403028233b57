//! Match reporting: turn a loose result report into a stored match.

use crate::models::{MatchId, MatchOutcome, PlayerId, Scope};
use crate::store::{Store, StoreError};

/// Record a match result in `scope`.
///
/// Exactly one of `winner`/`loser` or `tie1`/`tie2` should be fully set, with two
/// distinct players. Anything else is ignored: nothing is written and `Ok(None)`
/// is returned. If both patterns are set the decisive one is used.
pub fn report_match(
    store: &dyn Store,
    scope: Scope,
    winner: Option<PlayerId>,
    loser: Option<PlayerId>,
    tie1: Option<PlayerId>,
    tie2: Option<PlayerId>,
) -> Result<Option<MatchId>, StoreError> {
    let Some(outcome) = MatchOutcome::from_report(winner, loser, tie1, tie2) else {
        log::debug!(
            "Ignoring malformed match report in {}: winner={:?} loser={:?} tie1={:?} tie2={:?}",
            scope,
            winner,
            loser,
            tie1,
            tie2
        );
        return Ok(None);
    };
    let id = store.insert_match(scope, outcome)?;
    log::debug!("Recorded match {} in {}: {:?}", id, scope, outcome);
    Ok(Some(id))
}
