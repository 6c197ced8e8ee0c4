//! SQLite storage bootstrap, schema initialization and connection acquisition.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the magazine core.
//! - Create the `authors`/`magazines`/`articles` schema when absent.
//! - Hand out one scoped connection per repository operation.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Every connection has `foreign_keys=ON` before it is handed out.
//! - Repositories never read or write rows before the schema exists.

use thiserror::Error;

pub mod migrations;
mod open;
mod store;

pub use open::{open_db, open_db_in_memory};
pub use store::Store;

pub type DbResult<T> = Result<T, DbError>;

/// Storage-layer failure. Always propagated to the caller unchanged.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}
