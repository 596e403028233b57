//! Persistence collaborator: the [`Store`] trait and its implementations.
//!
//! Every core operation receives a store handle explicitly, so tests can run
//! against [`MemoryStore`] or an in-memory [`SqliteStore`] without a server.

mod error;
mod memory;
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

pub(crate) use error::clean_name;

use crate::logic::tally;
use crate::models::{
    GameMatch, MatchId, MatchOutcome, Player, PlayerId, PlayerStanding, Scope, Tournament,
    TournamentId,
};

/// Store/retrieve operations the standings and pairing logic depend on.
///
/// Every method is one synchronous read or write. Writes are atomic: a failed
/// call leaves nothing behind.
pub trait Store: Send + Sync {
    /// Create a tournament and return its id. Names need not be unique.
    fn create_tournament(&self, name: &str) -> Result<TournamentId, StoreError>;

    /// All tournaments, ordered by id.
    fn tournaments(&self) -> Result<Vec<Tournament>, StoreError>;

    /// Remove every tournament together with its enrollments and matches.
    fn delete_tournaments(&self) -> Result<(), StoreError>;

    /// Create a player; in tournament scope also enroll them.
    fn register_player(&self, name: &str, scope: Scope) -> Result<PlayerId, StoreError>;

    /// Enroll an existing player in a tournament. Enrolling twice is a no-op.
    fn enroll_player(&self, player: PlayerId, tournament: TournamentId) -> Result<(), StoreError>;

    /// Players in scope, ordered by id.
    fn players(&self, scope: Scope) -> Result<Vec<Player>, StoreError>;

    fn count_players(&self, scope: Scope) -> Result<usize, StoreError> {
        Ok(self.players(scope)?.len())
    }

    /// Global scope deletes every player (and with them all matches and
    /// enrollments). Tournament scope only removes that tournament's enrollments.
    fn delete_players(&self, scope: Scope) -> Result<(), StoreError>;

    /// Persist one match. Both participants must exist.
    fn insert_match(&self, scope: Scope, outcome: MatchOutcome) -> Result<MatchId, StoreError>;

    /// Matches in scope, ordered by id.
    fn matches(&self, scope: Scope) -> Result<Vec<GameMatch>, StoreError>;

    fn delete_matches(&self, scope: Scope) -> Result<(), StoreError>;

    /// Standings for every player in scope, highest points first.
    fn standings(&self, scope: Scope) -> Result<Vec<PlayerStanding>, StoreError> {
        let players = self.players(scope)?;
        let matches = self.matches(scope)?;
        Ok(tally(&players, &matches))
    }
}
