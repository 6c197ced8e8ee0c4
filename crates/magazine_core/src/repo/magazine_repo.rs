//! Magazine repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert-or-update magazines and look them up by key.
//! - Traverse magazine -> articles and magazine -> authors on demand,
//!   including the "more than two articles" contributor aggregate.

use super::rows::{
    load_magazine, query_articles, query_authors, require_id, ARTICLE_SELECT_SQL,
};
use super::{RepoError, RepoResult};
use crate::db::Store;
use crate::model::article::Article;
use crate::model::author::Author;
use crate::model::field::stored_text;
use crate::model::magazine::{Magazine, MagazineId};
use log::info;
use rusqlite::params;

/// Article count an author must exceed in one magazine to count as a
/// contributing author.
pub const CONTRIBUTING_AUTHOR_MIN_EXCLUSIVE: i64 = 2;

/// Repository interface for magazine persistence and relationships.
pub trait MagazineRepository {
    /// Inserts a new magazine or updates the stored one; returns its identity.
    fn save(&self, magazine: &Magazine) -> RepoResult<MagazineId>;
    /// Loads one magazine, or `None` when no row has this key.
    fn find_by_id(&self, id: MagazineId) -> RepoResult<Option<Magazine>>;
    /// Articles published in this magazine, in storage order.
    fn articles(&self, magazine: &Magazine) -> RepoResult<Vec<Article>>;
    /// Authors with at least one article here, each listed once.
    fn contributors(&self, magazine: &Magazine) -> RepoResult<Vec<Author>>;
    /// Titles of this magazine's articles, in storage order.
    fn article_titles(&self, magazine: &Magazine) -> RepoResult<Vec<String>>;
    /// Authors with more than two articles in this magazine.
    fn contributing_authors(&self, magazine: &Magazine) -> RepoResult<Vec<Author>>;
}

/// SQLite-backed magazine repository.
pub struct SqliteMagazineRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteMagazineRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl MagazineRepository for SqliteMagazineRepository<'_> {
    fn save(&self, magazine: &Magazine) -> RepoResult<MagazineId> {
        let conn = self.store.connect()?;
        match magazine.id() {
            None => {
                conn.execute(
                    "INSERT INTO magazines (name, category) VALUES (?1, ?2);",
                    params![magazine.name(), magazine.category()],
                )?;
                let id = conn.last_insert_rowid();
                magazine.assign_id(id);
                info!("event=magazine_insert module=repo status=ok id={id}");
                Ok(id)
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE magazines SET name = ?1, category = ?2 WHERE id = ?3;",
                    params![magazine.name(), magazine.category(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "magazine",
                        id,
                    });
                }
                info!("event=magazine_update module=repo status=ok id={id}");
                Ok(id)
            }
        }
    }

    fn find_by_id(&self, id: MagazineId) -> RepoResult<Option<Magazine>> {
        let conn = self.store.connect()?;
        load_magazine(&conn, id)
    }

    fn articles(&self, magazine: &Magazine) -> RepoResult<Vec<Article>> {
        let magazine_id = require_id(magazine.id(), "magazine")?;
        let conn = self.store.connect()?;
        query_articles(
            &conn,
            &format!("{ARTICLE_SELECT_SQL} WHERE magazine_id = ?1 ORDER BY id ASC;"),
            [magazine_id],
        )
    }

    fn contributors(&self, magazine: &Magazine) -> RepoResult<Vec<Author>> {
        let magazine_id = require_id(magazine.id(), "magazine")?;
        let conn = self.store.connect()?;
        query_authors(
            &conn,
            "SELECT au.id, au.name
             FROM authors au
             INNER JOIN articles ar ON ar.author_id = au.id
             WHERE ar.magazine_id = ?1
             GROUP BY au.id
             ORDER BY MIN(ar.id) ASC;",
            [magazine_id],
        )
    }

    fn article_titles(&self, magazine: &Magazine) -> RepoResult<Vec<String>> {
        let magazine_id = require_id(magazine.id(), "magazine")?;
        let conn = self.store.connect()?;
        let mut stmt =
            conn.prepare("SELECT title FROM articles WHERE magazine_id = ?1 ORDER BY id ASC;")?;
        let mut rows = stmt.query([magazine_id])?;
        let mut titles = Vec::new();
        while let Some(row) = rows.next()? {
            titles.push(stored_text("article title", row.get_ref(0)?)?);
        }
        Ok(titles)
    }

    fn contributing_authors(&self, magazine: &Magazine) -> RepoResult<Vec<Author>> {
        let magazine_id = require_id(magazine.id(), "magazine")?;
        let conn = self.store.connect()?;
        query_authors(
            &conn,
            "SELECT au.id, au.name
             FROM authors au
             INNER JOIN articles ar ON ar.author_id = au.id
             WHERE ar.magazine_id = ?1
             GROUP BY au.id
             HAVING COUNT(ar.id) > ?2
             ORDER BY MIN(ar.id) ASC;",
            params![magazine_id, CONTRIBUTING_AUTHOR_MIN_EXCLUSIVE],
        )
    }
}
