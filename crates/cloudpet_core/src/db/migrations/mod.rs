//! Ordered schema migrations for the slot store.
//!
//! # Invariants
//! - `MIGRATIONS` is sorted by strictly increasing `version`.
//! - Each applied migration bumps `PRAGMA user_version` inside the same
//!   transaction as its SQL.

use crate::db::{DbError, DbResult};
use log::{error, info, warn};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

impl Migration {
    fn apply(&self, tx: &Transaction<'_>) -> rusqlite::Result<()> {
        tx.execute_batch(self.sql)?;
        tx.pragma_update(None, "user_version", self.version)
    }
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_kv_slots.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version recorded in the database.
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Brings the schema up to `latest_version()` in one transaction.
///
/// # Errors
/// - `DbError::SchemaTooNew` when the file is ahead of this build.
/// - `DbError::Migration` naming the first migration that failed; nothing
///   from this call is committed in that case.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = current_version(conn)?;
    let latest = latest_version();

    if current > latest {
        warn!(
            "event=db_migrate module=db status=error error_code=schema_too_new found={current} supported={latest}"
        );
        return Err(DbError::SchemaTooNew {
            found: current,
            supported: latest,
        });
    }
    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        migration.apply(&tx).map_err(|source| {
            error!(
                "event=db_migrate module=db status=error error_code=migration_failed version={} error={source}",
                migration.version
            );
            DbError::Migration {
                version: migration.version,
                source,
            }
        })?;
    }
    tx.commit()?;

    info!("event=db_migrate module=db status=ok from_version={current} to_version={latest}");
    Ok(())
}
