//! Schema registry and executor.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Every migration is create-if-absent, so replaying it is harmless.
//! - Applied version is mirrored to `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

/// Tables owned by the magazine core, in foreign-key dependency order.
pub const CORE_TABLES: [&str; 3] = ["authors", "magazines", "articles"];

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

impl Migration {
    fn apply(&self, tx: &Transaction<'_>) -> DbResult<()> {
        tx.execute_batch(self.sql)?;
        tx.pragma_update(None, "user_version", self.version)?;
        Ok(())
    }
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the connected database up to [`latest_version`] in one transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    let pending = pending_since(from_version)?;
    let Some(target) = pending.last() else {
        return Ok(());
    };

    let tx = conn.transaction()?;
    pending.iter().try_for_each(|migration| migration.apply(&tx))?;
    tx.commit()?;

    info!(
        "event=schema_init module=db status=ok from_version={from_version} to_version={}",
        target.version
    );
    Ok(())
}

/// Migrations newer than `version`; errors when the database is ahead of us.
fn pending_since(version: u32) -> DbResult<&'static [Migration]> {
    let latest_supported = latest_version();
    if version > latest_supported {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: version,
            latest_supported,
        });
    }
    let first_pending = MIGRATIONS.partition_point(|migration| migration.version <= version);
    Ok(&MIGRATIONS[first_pending..])
}

/// Lists user tables present in the connected database, sorted by name.
pub fn list_tables(conn: &Connection) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name
         FROM sqlite_master
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
         ORDER BY name ASC;",
    )?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tables)
}
