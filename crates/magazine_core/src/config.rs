//! Store configuration.
//!
//! The whole store is addressed by one location parameter so tests can point
//! each run at an isolated database file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database file used when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "magazine.db";

/// Environment variable overriding [`DEFAULT_DB_PATH`].
pub const DB_PATH_ENV: &str = "MAGAZINE_DB_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file location.
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Reads `MAGAZINE_DB_PATH`, falling back to the default location when the
    /// variable is unset or blank.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DB_PATH_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(path) if !path.trim().is_empty() => Self::new(path.trim()),
            _ => Self::default(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_PATH)
    }
}
