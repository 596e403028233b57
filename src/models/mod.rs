//! Data structures for the Swiss tournament: players, tournaments, matches, standings.

mod game;
mod pairing;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, MatchOutcome};
pub use pairing::Pairing;
pub use player::{Player, PlayerId, PlayerStanding, POINTS_PER_TIE, POINTS_PER_WIN};
pub use tournament::{Scope, Tournament, TournamentId};
