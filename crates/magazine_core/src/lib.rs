//! Persistence core for authors, magazines and the articles that relate them.
//!
//! Entities are validated in memory (`model`), then saved, reloaded and
//! traversed through SQLite repositories (`repo`) that each acquire one
//! connection per operation from a shared [`Store`].

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::StoreConfig;
pub use db::{DbError, DbResult, Store};
pub use logging::{init_logging, logging_status, LoggingError};
pub use model::article::{Article, ArticleId};
pub use model::author::{Author, AuthorId};
pub use model::field::{ImmutableFieldError, ModelError, ValidationError, ValidationErrorKind};
pub use model::magazine::{Magazine, MagazineId};
pub use repo::article_repo::{ArticleRepository, SqliteArticleRepository};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::magazine_repo::{MagazineRepository, SqliteMagazineRepository};
pub use repo::{RepoError, RepoResult};

