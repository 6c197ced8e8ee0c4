//! Author entity.
//!
//! # Invariants
//! - `name` is non-empty and, once assigned, never changes for the lifetime
//!   of the instance (persisted or not).
//! - `id` is `None` until the first successful insert. It lives in a `Cell`
//!   so an author already shared with articles can still be saved.

use super::field::{assign_once, require_text, ModelError, OneShot, ValidationError};
use serde::Serialize;
use std::cell::Cell;

/// Store-generated author key.
pub type AuthorId = i64;

const NAME_FIELD: &str = "author name";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    id: Cell<Option<AuthorId>>,
    name: OneShot<String>,
}

impl Author {
    /// Creates an unsaved author. Rejects an empty name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = require_text(NAME_FIELD, name)?;
        Ok(Self {
            id: Cell::new(None),
            name: OneShot::Set(name),
        })
    }

    /// Rebuilds an author from a stored row without re-validating it.
    pub fn from_stored(id: AuthorId, name: String) -> Self {
        Self {
            id: Cell::new(Some(id)),
            name: OneShot::Set(name),
        }
    }

    pub fn id(&self) -> Option<AuthorId> {
        self.id.get()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Assigns the name. Fails with `ImmutableFieldError` once a name is set.
    pub fn set_name(&mut self, value: impl Into<String>) -> Result<(), ModelError> {
        assign_once(&mut self.name, NAME_FIELD, value)
    }

    pub(crate) fn assign_id(&self, id: AuthorId) {
        self.id.set(Some(id));
    }
}
