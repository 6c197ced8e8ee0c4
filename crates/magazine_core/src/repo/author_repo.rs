//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Insert-or-update authors and look them up by key.
//! - Traverse author -> articles and author -> magazines on demand.

use super::article_repo::{ArticleRepository, SqliteArticleRepository};
use super::rows::{
    load_author, query_articles, query_magazines, require_id, ARTICLE_SELECT_SQL,
};
use super::{RepoError, RepoResult};
use crate::db::Store;
use crate::model::article::Article;
use crate::model::author::{Author, AuthorId};
use crate::model::magazine::Magazine;
use log::info;
use rusqlite::params;
use std::rc::Rc;

/// Repository interface for author persistence and relationships.
pub trait AuthorRepository {
    /// Inserts a new author or updates the stored one; returns its identity.
    fn save(&self, author: &Author) -> RepoResult<AuthorId>;
    /// Loads one author, or `None` when no row has this key.
    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Articles written by this author, in storage order.
    fn articles(&self, author: &Author) -> RepoResult<Vec<Article>>;
    /// Magazines this author wrote for, each listed once.
    fn magazines(&self, author: &Author) -> RepoResult<Vec<Magazine>>;
    /// Creates and saves a new article by this author in `magazine`.
    fn add_article(
        &self,
        author: &Rc<Author>,
        title: &str,
        magazine: &Rc<Magazine>,
    ) -> RepoResult<Article>;

    /// Unique categories of [`AuthorRepository::magazines`], first-seen order.
    fn topic_areas(&self, author: &Author) -> RepoResult<Vec<String>> {
        let mut categories: Vec<String> = Vec::new();
        for magazine in self.magazines(author)? {
            let category = magazine.category();
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        Ok(categories)
    }
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteAuthorRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn save(&self, author: &Author) -> RepoResult<AuthorId> {
        let conn = self.store.connect()?;
        match author.id() {
            None => {
                conn.execute("INSERT INTO authors (name) VALUES (?1);", [author.name()])?;
                let id = conn.last_insert_rowid();
                author.assign_id(id);
                info!("event=author_insert module=repo status=ok id={id}");
                Ok(id)
            }
            Some(id) => {
                let changed = conn.execute(
                    "UPDATE authors SET name = ?1 WHERE id = ?2;",
                    params![author.name(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "author",
                        id,
                    });
                }
                info!("event=author_update module=repo status=ok id={id}");
                Ok(id)
            }
        }
    }

    fn find_by_id(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let conn = self.store.connect()?;
        load_author(&conn, id)
    }

    fn articles(&self, author: &Author) -> RepoResult<Vec<Article>> {
        let author_id = require_id(author.id(), "author")?;
        let conn = self.store.connect()?;
        query_articles(
            &conn,
            &format!("{ARTICLE_SELECT_SQL} WHERE author_id = ?1 ORDER BY id ASC;"),
            [author_id],
        )
    }

    fn magazines(&self, author: &Author) -> RepoResult<Vec<Magazine>> {
        let author_id = require_id(author.id(), "author")?;
        let conn = self.store.connect()?;
        // Grouping collapses repeat appearances; ordering follows the
        // author's first article in each magazine.
        query_magazines(
            &conn,
            "SELECT m.id, m.name, m.category
             FROM magazines m
             INNER JOIN articles a ON a.magazine_id = m.id
             WHERE a.author_id = ?1
             GROUP BY m.id
             ORDER BY MIN(a.id) ASC;",
            [author_id],
        )
    }

    fn add_article(
        &self,
        author: &Rc<Author>,
        title: &str,
        magazine: &Rc<Magazine>,
    ) -> RepoResult<Article> {
        let article = Article::new(title, Rc::clone(author), Rc::clone(magazine))?;
        SqliteArticleRepository::new(self.store).save(&article)?;
        Ok(article)
    }
}
