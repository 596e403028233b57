//! Tournament and Scope.

use serde::{Deserialize, Serialize};

/// Unique identifier for a tournament, assigned by the store.
pub type TournamentId = i64;

/// A named tournament owning its enrolled players and its matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
}

/// Which players and matches an operation covers.
///
/// `Global` is the single-tournament shape: every player and every match in the
/// store. `Tournament` restricts to one tournament's enrolled players and matches.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    #[default]
    Global,
    Tournament(TournamentId),
}

impl Scope {
    pub fn tournament(self) -> Option<TournamentId> {
        match self {
            Scope::Global => None,
            Scope::Tournament(id) => Some(id),
        }
    }
}

impl From<Option<TournamentId>> for Scope {
    fn from(id: Option<TournamentId>) -> Self {
        id.map_or(Scope::Global, Scope::Tournament)
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Tournament(id) => write!(f, "tournament {}", id),
        }
    }
}
