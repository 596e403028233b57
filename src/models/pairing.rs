//! Pairing for the next round.

use crate::models::player::{PlayerId, PlayerStanding};
use serde::{Deserialize, Serialize};

/// Two distinct players assigned to meet in the next round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub id1: PlayerId,
    pub name1: String,
    pub id2: PlayerId,
    pub name2: String,
}

impl Pairing {
    pub fn between(a: &PlayerStanding, b: &PlayerStanding) -> Self {
        Self {
            id1: a.id,
            name1: a.name.clone(),
            id2: b.id,
            name2: b.name.clone(),
        }
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.id1 == player || self.id2 == player
    }
}
