//! Server configuration from environment variables.
//!
//! - `HOST` (default `0.0.0.0`) and `PORT` (default `8080`): listen address.
//! - `DATABASE`: path to a SQLite file. Unset or empty keeps everything in memory.

use crate::store::{MemoryStore, SqliteStore, Store, StoreError};
use std::path::PathBuf;
use std::sync::Arc;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. An unparsable `PORT` falls back to the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(default_host);
        let port = match lookup("PORT") {
            Some(p) => p.trim().parse().unwrap_or_else(|_| {
                log::warn!("Ignoring invalid PORT {:?}, using {}", p, default_port());
                default_port()
            }),
            None => default_port(),
        };
        let database = lookup("DATABASE")
            .filter(|d| !d.trim().is_empty())
            .map(PathBuf::from);
        Self {
            host,
            port,
            database,
        }
    }

    /// Open the configured store: SQLite when `database` is set, memory otherwise.
    pub fn open_store(&self) -> Result<Arc<dyn Store>, StoreError> {
        let store: Arc<dyn Store> = match &self.database {
            Some(path) => Arc::new(SqliteStore::open(path)?),
            None => {
                log::info!("No DATABASE set, using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(store)
    }
}
