//! Entity managers: SQLite persistence and relationship traversal.
//!
//! # Responsibility
//! - Insert-or-update entities depending on whether they carry an identity.
//! - Rebuild entities from stored rows.
//! - Answer relationship questions with join queries computed on demand.
//!
//! # Invariants
//! - Every public operation acquires its own connection from [`Store`] and
//!   releases it before returning.
//! - All values reach SQL through parameter binding.
//!
//! [`Store`]: crate::db::Store

pub mod article_repo;
pub mod author_repo;
mod error;
pub mod magazine_repo;
mod rows;

pub use error::{RepoError, RepoResult};
