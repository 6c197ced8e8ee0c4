//! Row decoding and by-key lookups shared by the three repositories.
//!
//! Lookups take a borrowed connection so that reconstruction performed inside
//! one operation reuses that operation's connection.

use super::{RepoError, RepoResult};
use crate::model::article::{Article, ArticleId};
use crate::model::author::{Author, AuthorId};
use crate::model::field::stored_text;
use crate::model::magazine::{Magazine, MagazineId};
use rusqlite::{Connection, OptionalExtension, Params, Row};
use std::collections::HashMap;
use std::rc::Rc;

pub(super) const AUTHOR_SELECT_SQL: &str = "SELECT id, name FROM authors";
pub(super) const MAGAZINE_SELECT_SQL: &str = "SELECT id, name, category FROM magazines";
pub(super) const ARTICLE_SELECT_SQL: &str =
    "SELECT id, title, author_id, magazine_id FROM articles";

pub(super) fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let id: AuthorId = row.get("id")?;
    let name = stored_text("author name", row.get_ref("name")?)?;
    Ok(Author::from_stored(id, name))
}

pub(super) fn parse_magazine_row(row: &Row<'_>) -> RepoResult<Magazine> {
    let id: MagazineId = row.get("id")?;
    let name = stored_text("magazine name", row.get_ref("name")?)?;
    let category = stored_text("magazine category", row.get_ref("category")?)?;
    Ok(Magazine::from_stored(id, name, category))
}

pub(super) fn load_author(conn: &Connection, id: AuthorId) -> RepoResult<Option<Author>> {
    let mut stmt = conn.prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_author_row(row)?));
    }
    Ok(None)
}

pub(super) fn load_magazine(conn: &Connection, id: MagazineId) -> RepoResult<Option<Magazine>> {
    let mut stmt = conn.prepare(&format!("{MAGAZINE_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_magazine_row(row)?));
    }
    Ok(None)
}

pub(super) fn query_authors(
    conn: &Connection,
    sql: &str,
    params: impl Params,
) -> RepoResult<Vec<Author>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut authors = Vec::new();
    while let Some(row) = rows.next()? {
        authors.push(parse_author_row(row)?);
    }
    Ok(authors)
}

pub(super) fn query_magazines(
    conn: &Connection,
    sql: &str,
    params: impl Params,
) -> RepoResult<Vec<Magazine>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut magazines = Vec::new();
    while let Some(row) = rows.next()? {
        magazines.push(parse_magazine_row(row)?);
    }
    Ok(magazines)
}

pub(super) fn load_article(conn: &Connection, id: ArticleId) -> RepoResult<Option<Article>> {
    let stored = conn
        .query_row(
            &format!("{ARTICLE_SELECT_SQL} WHERE id = ?1;"),
            [id],
            StoredArticle::from_row,
        )
        .optional()?;

    match stored {
        Some(stored) => Ok(Some(ReferenceResolver::new(conn).resolve(stored)?)),
        None => Ok(None),
    }
}

/// Runs an article query and rebuilds every row with resolved references.
pub(super) fn query_articles(
    conn: &Connection,
    sql: &str,
    params: impl Params,
) -> RepoResult<Vec<Article>> {
    let mut stmt = conn.prepare(sql)?;
    let stored = stmt
        .query_map(params, StoredArticle::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut resolver = ReferenceResolver::new(conn);
    stored
        .into_iter()
        .map(|article| resolver.resolve(article))
        .collect()
}

/// Raw `articles` row before its foreign keys are resolved.
struct StoredArticle {
    id: ArticleId,
    title: rusqlite::types::Value,
    author_id: Option<AuthorId>,
    magazine_id: Option<MagazineId>,
}

impl StoredArticle {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            author_id: row.get("author_id")?,
            magazine_id: row.get("magazine_id")?,
        })
    }
}

/// Resolves article foreign keys by id, sharing one `Rc` per key within a
/// single operation. Lives only as long as that operation.
struct ReferenceResolver<'conn> {
    conn: &'conn Connection,
    authors: HashMap<AuthorId, Rc<Author>>,
    magazines: HashMap<MagazineId, Rc<Magazine>>,
}

impl<'conn> ReferenceResolver<'conn> {
    fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            authors: HashMap::new(),
            magazines: HashMap::new(),
        }
    }

    fn resolve(&mut self, stored: StoredArticle) -> RepoResult<Article> {
        let title = stored_text("article title", (&stored.title).into())?;
        let author = self.author(stored.id, stored.author_id)?;
        let magazine = self.magazine(stored.id, stored.magazine_id)?;
        Ok(Article::from_stored(stored.id, title, author, magazine))
    }

    fn author(&mut self, article_id: ArticleId, key: Option<AuthorId>) -> RepoResult<Rc<Author>> {
        let orphaned = || RepoError::OrphanedReference {
            article_id,
            entity: "author",
            key,
        };
        let id = key.ok_or_else(orphaned)?;
        if let Some(author) = self.authors.get(&id) {
            return Ok(Rc::clone(author));
        }

        let author = Rc::new(load_author(self.conn, id)?.ok_or_else(orphaned)?);
        self.authors.insert(id, Rc::clone(&author));
        Ok(author)
    }

    fn magazine(
        &mut self,
        article_id: ArticleId,
        key: Option<MagazineId>,
    ) -> RepoResult<Rc<Magazine>> {
        let orphaned = || RepoError::OrphanedReference {
            article_id,
            entity: "magazine",
            key,
        };
        let id = key.ok_or_else(orphaned)?;
        if let Some(magazine) = self.magazines.get(&id) {
            return Ok(Rc::clone(magazine));
        }

        let magazine = Rc::new(load_magazine(self.conn, id)?.ok_or_else(orphaned)?);
        self.magazines.insert(id, Rc::clone(&magazine));
        Ok(magazine)
    }
}

/// Returns the identity of a saved entity, or `Unpersisted` for a new one.
pub(super) fn require_id(id: Option<i64>, entity: &'static str) -> RepoResult<i64> {
    id.ok_or(RepoError::Unpersisted { entity })
}
