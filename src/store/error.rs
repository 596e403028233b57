//! Store error types.

use crate::models::{PlayerId, TournamentId};
use thiserror::Error;

/// Errors surfaced by a [`Store`](super::Store).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached (or its lock was poisoned).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Player {0} not found")]
    UnknownPlayer(PlayerId),

    #[error("Tournament {0} not found")]
    UnknownTournament(TournamentId),

    /// Player and tournament names must be non-empty after trimming.
    #[error("Name must not be empty")]
    InvalidName,
}

/// Trim a display name, rejecting empty ones.
pub(crate) fn clean_name(name: &str) -> Result<&str, StoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidName);
    }
    Ok(trimmed)
}
