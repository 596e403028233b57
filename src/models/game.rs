//! Recorded matches and their outcomes.

use crate::models::player::PlayerId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a match, assigned by the store.
pub type MatchId = i64;

/// Result of a single match between two players.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchOutcome {
    Decisive { winner: PlayerId, loser: PlayerId },
    Tie { first: PlayerId, second: PlayerId },
}

impl MatchOutcome {
    /// Build an outcome from a loose report.
    ///
    /// A complete winner/loser pair takes precedence over a tie pair. Returns
    /// `None` when neither pattern is fully specified with two distinct players.
    pub fn from_report(
        winner: Option<PlayerId>,
        loser: Option<PlayerId>,
        tie1: Option<PlayerId>,
        tie2: Option<PlayerId>,
    ) -> Option<Self> {
        match (winner, loser, tie1, tie2) {
            (Some(winner), Some(loser), _, _) if winner != loser => {
                Some(MatchOutcome::Decisive { winner, loser })
            }
            (_, _, Some(first), Some(second)) if first != second => {
                Some(MatchOutcome::Tie { first, second })
            }
            _ => None,
        }
    }

    /// Both participants, in recorded order.
    pub fn players(&self) -> [PlayerId; 2] {
        match *self {
            MatchOutcome::Decisive { winner, loser } => [winner, loser],
            MatchOutcome::Tie { first, second } => [first, second],
        }
    }
}

/// A recorded match. Immutable once stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// None for matches recorded outside any tournament.
    pub tournament: Option<TournamentId>,
    pub outcome: MatchOutcome,
    pub recorded_at: DateTime<Utc>,
}
