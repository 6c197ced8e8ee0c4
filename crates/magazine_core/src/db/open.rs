//! Connection bootstrap utilities for SQLite.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Returned connections have the schema fully applied.

use super::migrations::apply_migrations;
use super::DbResult;
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and bootstraps the schema.
///
/// Emits `db_open` events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let started_at = Instant::now();
    let opened: DbResult<Connection> =
        Connection::open(path.as_ref()).map_err(Into::into);
    finish_open(opened, "file", started_at)
}

/// Opens a private in-memory SQLite database and bootstraps the schema.
///
/// Each call yields an independent database; nothing is shared between
/// connections.
pub fn open_db_in_memory() -> DbResult<Connection> {
    let started_at = Instant::now();
    let opened: DbResult<Connection> = Connection::open_in_memory().map_err(Into::into);
    finish_open(opened, "memory", started_at)
}

fn finish_open(
    opened: DbResult<Connection>,
    mode: &str,
    started_at: Instant,
) -> DbResult<Connection> {
    let result = opened.and_then(|mut conn| {
        bootstrap_connection(&mut conn)?;
        Ok(conn)
    });

    match &result {
        Ok(_) => debug!(
            "event=db_open module=db status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=db_open module=db status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }

    result
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    // Not on by default in SQLite; must be set per connection.
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}
