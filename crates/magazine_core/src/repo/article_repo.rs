//! Article repository contract and SQLite implementation.
//!
//! # Invariants
//! - Only foreign keys are written; author/magazine data stays in their own
//!   tables.
//! - Saving reads the references' identities at save time, so they may be
//!   saved after the article is built; both must carry one by then.
//! - Reconstruction fails on a dangling or NULL foreign key instead of
//!   producing an article with a missing side.

use super::rows::load_article;
use super::{RepoError, RepoResult};
use crate::db::Store;
use crate::model::article::{Article, ArticleId};
use log::info;
use rusqlite::params;

/// Repository interface for article persistence.
pub trait ArticleRepository {
    /// Inserts a new article or updates the stored one; returns its identity.
    fn save(&self, article: &Article) -> RepoResult<ArticleId>;
    /// Loads one article with its author and magazine, or `None` when absent.
    fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteArticleRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn save(&self, article: &Article) -> RepoResult<ArticleId> {
        let author_id = article
            .author()
            .id()
            .ok_or(RepoError::UnpersistedReference { entity: "author" })?;
        let magazine_id = article
            .magazine()
            .id()
            .ok_or(RepoError::UnpersistedReference { entity: "magazine" })?;

        let conn = self.store.connect()?;
        match article.id() {
            None => {
                conn.execute(
                    "INSERT INTO articles (title, author_id, magazine_id) VALUES (?1, ?2, ?3);",
                    params![article.title(), author_id, magazine_id],
                )?;
                let id = conn.last_insert_rowid();
                article.assign_id(id);
                info!(
                    "event=article_insert module=repo status=ok id={id} author_id={author_id} magazine_id={magazine_id}"
                );
                Ok(id)
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE articles
                     SET title = ?1, author_id = ?2, magazine_id = ?3
                     WHERE id = ?4;",
                    params![article.title(), author_id, magazine_id, id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "article",
                        id,
                    });
                }
                info!("event=article_update module=repo status=ok id={id}");
                Ok(id)
            }
        }
    }

    fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        let conn = self.store.connect()?;
        load_article(&conn, id)
    }
}

