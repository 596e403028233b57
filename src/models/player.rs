//! Player and PlayerStanding data structures.

use serde::{Deserialize, Serialize};

/// Unique identifier for a player, assigned by the store.
pub type PlayerId = i64;

/// Points awarded per result.
pub const POINTS_PER_WIN: u32 = 3;
pub const POINTS_PER_TIE: u32 = 1;

/// A registered player. Never mutated after registration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Derived standings row for one player. Not stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerStanding {
    pub id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub ties: u32,
    /// Matches played (wins + ties + losses).
    pub matches: u32,
}

impl PlayerStanding {
    /// Zeroed standing for a player with no recorded matches.
    pub fn for_player(p: &Player) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            wins: 0,
            ties: 0,
            matches: 0,
        }
    }

    pub fn points(&self) -> u32 {
        self.wins * POINTS_PER_WIN + self.ties * POINTS_PER_TIE
    }

    pub fn losses(&self) -> u32 {
        self.matches.saturating_sub(self.wins + self.ties)
    }

    /// Record a win for this player.
    pub fn add_win(&mut self) {
        self.wins += 1;
        self.matches += 1;
    }

    /// Record a loss for this player.
    pub fn add_loss(&mut self) {
        self.matches += 1;
    }

    /// Record a tie for this player.
    pub fn add_tie(&mut self) {
        self.ties += 1;
        self.matches += 1;
    }
}
