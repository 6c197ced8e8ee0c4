use crate::db::DbError;
use crate::model::field::ValidationError;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entity persistence and relationship queries.
///
/// A missing row on a by-key lookup is `Ok(None)`, not an error.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    /// A relationship query was asked of an entity that was never saved.
    #[error("{entity} has no identity yet; save it before querying its relationships")]
    Unpersisted { entity: &'static str },
    /// An article was saved while its author or magazine had no identity.
    #[error("cannot save article: referenced {entity} has no identity yet")]
    UnpersistedReference { entity: &'static str },
    /// An update targeted a row that no longer exists.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    /// A stored article points at an author/magazine row that does not exist.
    #[error("article {article_id} references missing {entity} {}", display_key(.key))]
    OrphanedReference {
        article_id: i64,
        entity: &'static str,
        key: Option<i64>,
    },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

fn display_key(key: &Option<i64>) -> String {
    key.map_or_else(|| "NULL".to_string(), |id| id.to_string())
}
