//! Swiss-system tournament manager: library with models, store and business logic.

pub mod api;
pub mod config;
pub mod export;
pub mod logic;
pub mod models;
pub mod store;

pub use config::AppConfig;
pub use export::standings_csv;
pub use logic::{compute_standings, generate_pairings, report_match, swiss_pairings, tally};
pub use models::{
    GameMatch, MatchId, MatchOutcome, Pairing, Player, PlayerId, PlayerStanding, Scope, Tournament,
    TournamentId, POINTS_PER_TIE, POINTS_PER_WIN,
};
pub use store::{MemoryStore, SqliteStore, Store, StoreError};
