//! Article entity.
//!
//! # Invariants
//! - `title` is non-empty and one-shot, like `Author.name`.
//! - Author and magazine are shared references; an article never owns or
//!   copies them and exposes no setter for either.

use super::author::Author;
use super::field::{assign_once, require_text, ModelError, OneShot, ValidationError};
use super::magazine::Magazine;
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

/// Store-generated article key.
pub type ArticleId = i64;

const TITLE_FIELD: &str = "article title";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    id: Cell<Option<ArticleId>>,
    title: OneShot<String>,
    author: Rc<Author>,
    magazine: Rc<Magazine>,
}

impl Article {
    /// Creates an unsaved article. Only the title is validated; whether the
    /// author and magazine are persisted is checked when the article is saved.
    pub fn new(
        title: impl Into<String>,
        author: Rc<Author>,
        magazine: Rc<Magazine>,
    ) -> Result<Self, ValidationError> {
        let title = require_text(TITLE_FIELD, title)?;
        Ok(Self {
            id: Cell::new(None),
            title: OneShot::Set(title),
            author,
            magazine,
        })
    }

    /// Rebuilds an article from a stored row and its resolved references.
    pub fn from_stored(
        id: ArticleId,
        title: String,
        author: Rc<Author>,
        magazine: Rc<Magazine>,
    ) -> Self {
        Self {
            id: Cell::new(Some(id)),
            title: OneShot::Set(title),
            author,
            magazine,
        }
    }

    pub fn id(&self) -> Option<ArticleId> {
        self.id.get()
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Assigns the title. Fails with `ImmutableFieldError` once a title is set.
    pub fn set_title(&mut self, value: impl Into<String>) -> Result<(), ModelError> {
        assign_once(&mut self.title, TITLE_FIELD, value)
    }

    pub fn author(&self) -> &Rc<Author> {
        &self.author
    }

    pub fn magazine(&self) -> &Rc<Magazine> {
        &self.magazine
    }

    pub(crate) fn assign_id(&self, id: ArticleId) {
        self.id.set(Some(id));
    }
}

#[cfg(test)]
mod tests {
    use super::Article;
    use crate::model::author::Author;
    use crate::model::field::{ModelError, ValidationErrorKind};
    use crate::model::magazine::Magazine;
    use std::rc::Rc;

    fn refs() -> (Rc<Author>, Rc<Magazine>) {
        (
            Rc::new(Author::new("Carol").unwrap()),
            Rc::new(Magazine::new("Data Monthly", "Data").unwrap()),
        )
    }

    #[test]
    fn article_shares_its_references() {
        let (author, magazine) = refs();
        let article = Article::new("Valid Title", author.clone(), magazine.clone()).unwrap();
        assert!(Rc::ptr_eq(article.author(), &author));
        assert!(Rc::ptr_eq(article.magazine(), &magazine));
    }

    #[test]
    fn identity_assigned_after_sharing_is_visible() {
        let (author, magazine) = refs();
        let article = Article::new("Late Keys", author.clone(), magazine.clone()).unwrap();

        author.assign_id(11);
        magazine.assign_id(12);

        assert_eq!(article.author().id(), Some(11));
        assert_eq!(article.magazine().id(), Some(12));
    }

    #[test]
    fn title_is_one_shot() {
        let (author, magazine) = refs();
        let mut article = Article::new("Valid Title", author, magazine).unwrap();
        let err = article.set_title("New Title").unwrap_err();
        assert!(matches!(err, ModelError::Immutable(_)));
        assert_eq!(article.title(), "Valid Title");
    }

    #[test]
    fn empty_title_is_rejected() {
        let (author, magazine) = refs();
        let err = Article::new("", author, magazine).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Empty);
    }
}
