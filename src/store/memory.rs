//! In-memory store: all state behind one `RwLock`, lost when dropped.

use super::{clean_name, Store, StoreError};
use crate::logic::tally;
use crate::models::{
    GameMatch, MatchId, MatchOutcome, Player, PlayerId, PlayerStanding, Scope, Tournament,
    TournamentId,
};
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct MemoryState {
    last_player_id: PlayerId,
    last_tournament_id: TournamentId,
    last_match_id: MatchId,
    players: BTreeMap<PlayerId, Player>,
    tournaments: BTreeMap<TournamentId, Tournament>,
    /// Enrolled players per tournament.
    enrollments: BTreeMap<TournamentId, BTreeSet<PlayerId>>,
    matches: Vec<GameMatch>,
}

impl MemoryState {
    fn check_scope(&self, scope: Scope) -> Result<(), StoreError> {
        match scope {
            Scope::Tournament(id) if !self.tournaments.contains_key(&id) => {
                Err(StoreError::UnknownTournament(id))
            }
            _ => Ok(()),
        }
    }

    fn check_player(&self, id: PlayerId) -> Result<(), StoreError> {
        if self.players.contains_key(&id) {
            Ok(())
        } else {
            Err(StoreError::UnknownPlayer(id))
        }
    }

    fn enroll(&mut self, player: PlayerId, tournament: TournamentId) {
        self.enrollments.entry(tournament).or_default().insert(player);
    }

    fn players_in(&self, scope: Scope) -> Vec<Player> {
        match scope {
            Scope::Global => self.players.values().cloned().collect(),
            Scope::Tournament(t) => self
                .enrollments
                .get(&t)
                .into_iter()
                .flatten()
                .filter_map(|id| self.players.get(id).cloned())
                .collect(),
        }
    }

    fn matches_in(&self, scope: Scope) -> Vec<GameMatch> {
        match scope {
            Scope::Global => self.matches.clone(),
            Scope::Tournament(t) => self
                .matches
                .iter()
                .filter(|m| m.tournament == Some(t))
                .cloned()
                .collect(),
        }
    }
}

/// Store keeping everything in process memory. Ids are assigned from 1 upwards
/// and never reused, even after a reset.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))
    }
}

impl Store for MemoryStore {
    fn create_tournament(&self, name: &str) -> Result<TournamentId, StoreError> {
        let name = clean_name(name)?;
        let mut g = self.write()?;
        g.last_tournament_id += 1;
        let id = g.last_tournament_id;
        g.tournaments.insert(
            id,
            Tournament {
                id,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    fn tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        Ok(self.read()?.tournaments.values().cloned().collect())
    }

    fn delete_tournaments(&self) -> Result<(), StoreError> {
        let mut g = self.write()?;
        g.tournaments.clear();
        g.enrollments.clear();
        g.matches.retain(|m| m.tournament.is_none());
        Ok(())
    }

    fn register_player(&self, name: &str, scope: Scope) -> Result<PlayerId, StoreError> {
        let name = clean_name(name)?;
        let mut g = self.write()?;
        g.check_scope(scope)?;
        g.last_player_id += 1;
        let id = g.last_player_id;
        g.players.insert(id, Player::new(id, name));
        if let Scope::Tournament(t) = scope {
            g.enroll(id, t);
        }
        Ok(id)
    }

    fn enroll_player(&self, player: PlayerId, tournament: TournamentId) -> Result<(), StoreError> {
        let mut g = self.write()?;
        g.check_scope(Scope::Tournament(tournament))?;
        g.check_player(player)?;
        g.enroll(player, tournament);
        Ok(())
    }

    fn players(&self, scope: Scope) -> Result<Vec<Player>, StoreError> {
        let g = self.read()?;
        g.check_scope(scope)?;
        Ok(g.players_in(scope))
    }

    fn delete_players(&self, scope: Scope) -> Result<(), StoreError> {
        let mut g = self.write()?;
        g.check_scope(scope)?;
        match scope {
            Scope::Global => {
                g.players.clear();
                g.enrollments.clear();
                g.matches.clear();
            }
            Scope::Tournament(t) => {
                g.enrollments.remove(&t);
            }
        }
        Ok(())
    }

    fn insert_match(&self, scope: Scope, outcome: MatchOutcome) -> Result<MatchId, StoreError> {
        let mut g = self.write()?;
        g.check_scope(scope)?;
        for id in outcome.players() {
            g.check_player(id)?;
        }
        g.last_match_id += 1;
        let id = g.last_match_id;
        g.matches.push(GameMatch {
            id,
            tournament: scope.tournament(),
            outcome,
            recorded_at: Utc::now(),
        });
        Ok(id)
    }

    fn matches(&self, scope: Scope) -> Result<Vec<GameMatch>, StoreError> {
        let g = self.read()?;
        g.check_scope(scope)?;
        Ok(g.matches_in(scope))
    }

    fn delete_matches(&self, scope: Scope) -> Result<(), StoreError> {
        let mut g = self.write()?;
        g.check_scope(scope)?;
        match scope {
            Scope::Global => g.matches.clear(),
            Scope::Tournament(t) => g.matches.retain(|m| m.tournament != Some(t)),
        }
        Ok(())
    }

    /// Players and matches are read under one guard, so a concurrent report
    /// cannot be half counted.
    fn standings(&self, scope: Scope) -> Result<Vec<PlayerStanding>, StoreError> {
        let g = self.read()?;
        g.check_scope(scope)?;
        Ok(tally(&g.players_in(scope), &g.matches_in(scope)))
    }
}
