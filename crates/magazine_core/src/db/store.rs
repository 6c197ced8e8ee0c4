//! Connection-acquisition capability shared by every repository.
//!
//! # Invariants
//! - One call to [`Store::connect`] yields one connection owned by one
//!   operation; dropping it releases it on every path, including `?` returns.
//! - Nothing is cached between operations.

use super::migrations::list_tables;
use super::{open_db, DbResult};
use crate::config::StoreConfig;
use log::info;
use rusqlite::Connection;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Convenience for `Store::new(StoreConfig::new(path))`.
    pub fn at(path: impl AsRef<Path>) -> Self {
        Self::new(StoreConfig::new(path.as_ref()))
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Acquires a fresh, fully bootstrapped connection.
    pub fn connect(&self) -> DbResult<Connection> {
        open_db(self.config.db_path())
    }

    /// Creates the schema if absent and returns the tables now present.
    ///
    /// Safe to call any number of times.
    pub fn initialize(&self) -> DbResult<Vec<String>> {
        let conn = self.connect()?;
        let tables = list_tables(&conn)?;
        info!(
            "event=store_init module=db status=ok path={} tables={}",
            self.config.db_path().display(),
            tables.join(",")
        );
        Ok(tables)
    }
}
