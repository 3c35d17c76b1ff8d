//! Key-value slot contract and SQLite implementation.
//!
//! # Invariants
//! - `write_slot` is an upsert; a key never maps to more than one row.
//! - Callers only see values, never SQL rows.

use crate::db::migrations::current_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Schema version that introduced `kv_slots`.
const SLOT_SCHEMA_VERSION: u32 = 1;

pub type RepoResult<T> = Result<T, RepoError>;

/// Slot storage failure.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// The connection was not migrated far enough to hold slots.
    SchemaNotReady { found: u32, required: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::SchemaNotReady { found, required } => write!(
                f,
                "slot storage requires schema version {required}, found {found}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::SchemaNotReady { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Connection(value))
    }
}

/// Durable named-slot storage.
pub trait SlotRepository {
    /// Returns the slot value, or `None` when the slot was never written.
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Replaces the slot value.
    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Removes the slot. Returns whether a value existed.
    fn clear_slot(&self, key: &str) -> RepoResult<bool>;
}

/// SQLite-backed slot repository.
pub struct SqliteSlotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSlotRepository<'conn> {
    /// Wraps a connection opened through `crate::db`.
    ///
    /// # Errors
    /// - `RepoError::SchemaNotReady` when migrations have not created `kv_slots`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let found = current_version(conn)?;
        if found < SLOT_SCHEMA_VERSION {
            return Err(RepoError::SchemaNotReady {
                found,
                required: SLOT_SCHEMA_VERSION,
            });
        }
        Ok(Self { conn })
    }
}

impl SlotRepository for SqliteSlotRepository<'_> {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT slot_value FROM kv_slots WHERE slot_key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (slot_key, slot_value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(slot_key) DO UPDATE SET
                slot_value = excluded.slot_value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear_slot(&self, key: &str) -> RepoResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM kv_slots WHERE slot_key = ?1;", [key])?;
        Ok(removed > 0)
    }
}
