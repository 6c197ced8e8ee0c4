//! In-memory domain model for authors, magazines and articles.
//!
//! # Responsibility
//! - Validate field values at construction and assignment time.
//! - Enforce one-shot semantics for `Author.name` and `Article.title`.
//!
//! # Invariants
//! - Validation never waits for persistence: bad values are rejected at the
//!   point of assignment and the entity is left untouched.
//! - Entities carry no relationship collections; traversal lives in `repo`.

pub mod article;
pub mod author;
pub mod field;
pub mod magazine;
