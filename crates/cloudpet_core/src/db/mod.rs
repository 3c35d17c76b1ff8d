//! SQLite bootstrap for the durable slot substrate.
//!
//! Connections handed out by `open_db`/`open_db_in_memory` are configured
//! and migrated to `migrations::latest_version()`; the schema version lives
//! in `PRAGMA user_version`. Slot access goes through `crate::repo`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the pet store database.
#[derive(Debug)]
pub enum DbError {
    /// Opening, configuring or querying the connection failed.
    Connection(rusqlite::Error),
    /// The file was migrated by a newer build; it is left untouched.
    SchemaTooNew { found: u32, supported: u32 },
    /// Migration `version` failed; every pending migration was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "pet store connection failed: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "pet store schema v{found} was written by a newer build (supports up to v{supported})"
            ),
            Self::Migration { version, source } => {
                write!(f, "pet store migration v{version} failed: {source}")
            }
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Connection(value)
    }
}
