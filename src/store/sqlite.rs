//! SQLite store. The connection sits behind a `Mutex` and is held for exactly
//! one operation.

use super::{clean_name, Store, StoreError};
use crate::models::{
    GameMatch, MatchId, MatchOutcome, Player, PlayerId, PlayerStanding, Scope, Tournament,
    TournamentId,
};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = include_str!("schema.sql");

#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a database file and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        log::info!("Opening SQLite store at {}", path.display());
        Self::init(Connection::open(path)?)
    }

    /// Private database that disappears with the store. Used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("lock error".to_string()))
    }
}

fn check_scope(conn: &Connection, scope: Scope) -> Result<(), StoreError> {
    if let Scope::Tournament(id) = scope {
        let exists: bool = conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM tournament WHERE id = ?1)",
            params![id],
            |r| r.get(0),
        )?;
        if !exists {
            return Err(StoreError::UnknownTournament(id));
        }
    }
    Ok(())
}

fn check_player(conn: &Connection, id: PlayerId) -> Result<(), StoreError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM player WHERE id = ?1)",
        params![id],
        |r| r.get(0),
    )?;
    if exists {
        Ok(())
    } else {
        Err(StoreError::UnknownPlayer(id))
    }
}

fn player_from_row(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player::new(row.get(0)?, row.get::<_, String>(1)?))
}

fn standing_from_row(row: &Row<'_>) -> rusqlite::Result<PlayerStanding> {
    Ok(PlayerStanding {
        id: row.get(0)?,
        name: row.get(1)?,
        wins: row.get(2)?,
        ties: row.get(3)?,
        matches: row.get(4)?,
    })
}

/// Columns: id, tournament, winner, loser, p1_ties, p2_ties, recorded_at.
fn match_from_row(row: &Row<'_>) -> rusqlite::Result<Option<GameMatch>> {
    let outcome = MatchOutcome::from_report(row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?);
    let id: MatchId = row.get(0)?;
    let tournament: Option<TournamentId> = row.get(1)?;
    let recorded_at: DateTime<Utc> = row.get(6)?;
    Ok(outcome.map(|outcome| GameMatch {
        id,
        tournament,
        outcome,
        recorded_at,
    }))
}

impl Store for SqliteStore {
    fn create_tournament(&self, name: &str) -> Result<TournamentId, StoreError> {
        let name = clean_name(name)?;
        let conn = self.conn()?;
        conn.execute("INSERT INTO tournament (name) VALUES (?1)", params![name])?;
        Ok(conn.last_insert_rowid())
    }

    fn tournaments(&self) -> Result<Vec<Tournament>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, name FROM tournament ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(Tournament {
                id: r.get(0)?,
                name: r.get(1)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn delete_tournaments(&self) -> Result<(), StoreError> {
        self.conn()?.execute("DELETE FROM tournament", [])?;
        Ok(())
    }

    fn register_player(&self, name: &str, scope: Scope) -> Result<PlayerId, StoreError> {
        let name = clean_name(name)?;
        let mut conn = self.conn()?;
        check_scope(&conn, scope)?;
        let tx = conn.transaction()?;
        tx.execute("INSERT INTO player (name) VALUES (?1)", params![name])?;
        let id = tx.last_insert_rowid();
        if let Scope::Tournament(t) = scope {
            tx.execute(
                "INSERT INTO tournament_player (tournament, player) VALUES (?1, ?2)",
                params![t, id],
            )?;
        }
        tx.commit()?;
        Ok(id)
    }

    fn enroll_player(&self, player: PlayerId, tournament: TournamentId) -> Result<(), StoreError> {
        let conn = self.conn()?;
        check_scope(&conn, Scope::Tournament(tournament))?;
        check_player(&conn, player)?;
        conn.execute(
            "INSERT OR IGNORE INTO tournament_player (tournament, player) VALUES (?1, ?2)",
            params![tournament, player],
        )?;
        Ok(())
    }

    fn players(&self, scope: Scope) -> Result<Vec<Player>, StoreError> {
        let conn = self.conn()?;
        check_scope(&conn, scope)?;
        let players = match scope {
            Scope::Global => {
                let mut stmt = conn.prepare("SELECT id, name FROM player ORDER BY id")?;
                let rows = stmt.query_map([], player_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            Scope::Tournament(t) => {
                let mut stmt = conn.prepare(
                    "SELECT p.id, p.name FROM tournament_player tp \
                     JOIN player p ON p.id = tp.player \
                     WHERE tp.tournament = ?1 ORDER BY p.id",
                )?;
                let rows = stmt.query_map(params![t], player_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(players)
    }

    fn count_players(&self, scope: Scope) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        check_scope(&conn, scope)?;
        let count: i64 = match scope {
            Scope::Global => conn.query_row("SELECT COUNT(*) FROM player", [], |r| r.get(0))?,
            Scope::Tournament(t) => conn.query_row(
                "SELECT COUNT(*) FROM tournament_player WHERE tournament = ?1",
                params![t],
                |r| r.get(0),
            )?,
        };
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn delete_players(&self, scope: Scope) -> Result<(), StoreError> {
        let conn = self.conn()?;
        check_scope(&conn, scope)?;
        match scope {
            Scope::Global => conn.execute("DELETE FROM player", [])?,
            Scope::Tournament(t) => conn.execute(
                "DELETE FROM tournament_player WHERE tournament = ?1",
                params![t],
            )?,
        };
        Ok(())
    }

    fn insert_match(&self, scope: Scope, outcome: MatchOutcome) -> Result<MatchId, StoreError> {
        let conn = self.conn()?;
        check_scope(&conn, scope)?;
        for id in outcome.players() {
            check_player(&conn, id)?;
        }
        let tournament = scope.tournament();
        let now = Utc::now();
        match outcome {
            MatchOutcome::Decisive { winner, loser } => conn.execute(
                "INSERT INTO \"match\" (tournament, winner, loser, recorded_at) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![tournament, winner, loser, now],
            )?,
            MatchOutcome::Tie { first, second } => conn.execute(
                "INSERT INTO \"match\" (tournament, p1_ties, p2_ties, recorded_at) \
                 VALUES (?1, ?2, ?3, ?4)",
                params![tournament, first, second, now],
            )?,
        };
        Ok(conn.last_insert_rowid())
    }

    fn matches(&self, scope: Scope) -> Result<Vec<GameMatch>, StoreError> {
        let conn = self.conn()?;
        check_scope(&conn, scope)?;
        let mut stmt = conn.prepare(
            "SELECT id, tournament, winner, loser, p1_ties, p2_ties, recorded_at \
             FROM \"match\" WHERE ?1 IS NULL OR tournament = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![scope.tournament()], match_from_row)?;
        let mut matches = Vec::new();
        for row in rows {
            match row? {
                Some(m) => matches.push(m),
                None => log::warn!("Skipping match row with no usable outcome"),
            }
        }
        Ok(matches)
    }

    fn delete_matches(&self, scope: Scope) -> Result<(), StoreError> {
        let conn = self.conn()?;
        check_scope(&conn, scope)?;
        conn.execute(
            "DELETE FROM \"match\" WHERE ?1 IS NULL OR tournament = ?1",
            params![scope.tournament()],
        )?;
        Ok(())
    }

    fn standings(&self, scope: Scope) -> Result<Vec<PlayerStanding>, StoreError> {
        let conn = self.conn()?;
        check_scope(&conn, scope)?;
        let standings = match scope {
            Scope::Global => {
                let mut stmt = conn.prepare(
                    "SELECT id, name, wins, ties, matches FROM global_standings \
                     ORDER BY wins * 3 + ties DESC, id",
                )?;
                let rows = stmt.query_map([], standing_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            Scope::Tournament(t) => {
                let mut stmt = conn.prepare(
                    "SELECT id, name, wins, ties, matches FROM standings \
                     WHERE tournament = ?1 ORDER BY wins * 3 + ties DESC, id",
                )?;
                let rows = stmt.query_map(params![t], standing_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
        };
        Ok(standings)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_rejects_a_player_meeting_themselves() {
        let store = SqliteStore::open_in_memory().unwrap();
        let a = store.register_player("A", Scope::Global).unwrap();
        let conn = store.conn().unwrap();
        let now = Utc::now();
        assert!(conn
            .execute(
                "INSERT INTO \"match\" (winner, loser, recorded_at) VALUES (?1, ?1, ?2)",
                params![a, now],
            )
            .is_err());
        assert!(conn
            .execute(
                "INSERT INTO \"match\" (p1_ties, p2_ties, recorded_at) VALUES (?1, ?1, ?2)",
                params![a, now],
            )
            .is_err());
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM \"match\"", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
