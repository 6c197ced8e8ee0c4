//! Field validation and one-shot assignment.

use rusqlite::types::ValueRef;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Why a text field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The value is not text.
    Type,
    /// The value is an empty string.
    Empty,
}

impl Display for ValidationErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type => f.write_str("type"),
            Self::Empty => f.write_str("empty"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} ({kind}): {}", describe(.kind))]
pub struct ValidationError {
    pub field: &'static str,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(field: &'static str, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }
}

fn describe(kind: &ValidationErrorKind) -> &'static str {
    match kind {
        ValidationErrorKind::Type => "must be a string",
        ValidationErrorKind::Empty => "must be longer than 0 characters",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot modify {field}: already set")]
pub struct ImmutableFieldError {
    pub field: &'static str,
}

/// Failure of a setter that is both validated and possibly one-shot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Immutable(#[from] ImmutableFieldError),
}

/// Checks that `value` is non-empty text and returns it owned.
pub fn require_text(field: &'static str, value: impl Into<String>) -> Result<String, ValidationError> {
    let value = value.into();
    if value.is_empty() {
        return Err(ValidationError::new(field, ValidationErrorKind::Empty));
    }
    Ok(value)
}

/// Decodes a stored column that must hold text.
///
/// Emptiness is not checked: stored rows are trusted for content, only their
/// storage class is verified.
pub fn stored_text(field: &'static str, value: ValueRef<'_>) -> Result<String, ValidationError> {
    match value {
        ValueRef::Text(bytes) => String::from_utf8(bytes.to_vec())
            .map_err(|_| ValidationError::new(field, ValidationErrorKind::Type)),
        _ => Err(ValidationError::new(field, ValidationErrorKind::Type)),
    }
}

/// A value that may be assigned exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OneShot<T> {
    #[default]
    Unset,
    Set(T),
}

impl<T> OneShot<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Unset => None,
            Self::Set(value) => Some(value),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Fails with [`ImmutableFieldError`] once a value is present.
    pub fn ensure_unset(&self, field: &'static str) -> Result<(), ImmutableFieldError> {
        if self.is_set() {
            return Err(ImmutableFieldError { field });
        }
        Ok(())
    }

    pub fn set(&mut self, field: &'static str, value: T) -> Result<(), ImmutableFieldError> {
        self.ensure_unset(field)?;
        *self = Self::Set(value);
        Ok(())
    }
}

impl OneShot<String> {
    pub fn as_str(&self) -> &str {
        self.get().map(String::as_str).unwrap_or_default()
    }
}

impl<T: Serialize> Serialize for OneShot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

/// Runs the shared one-shot text assignment: lock check first, then validation.
pub(crate) fn assign_once(
    slot: &mut OneShot<String>,
    field: &'static str,
    value: impl Into<String>,
) -> Result<(), ModelError> {
    slot.ensure_unset(field)?;
    let value = require_text(field, value)?;
    slot.set(field, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_rejects_empty() {
        let err = require_text("author name", "").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Empty);
        assert_eq!(err.field, "author name");
    }

    #[test]
    fn one_shot_rejects_second_assignment() {
        let mut slot = OneShot::default();
        assign_once(&mut slot, "title", "first").unwrap();

        let err = assign_once(&mut slot, "title", "second").unwrap_err();
        assert_eq!(err, ModelError::Immutable(ImmutableFieldError { field: "title" }));
        assert_eq!(slot.as_str(), "first");
    }

    #[test]
    fn lock_is_checked_before_validation() {
        let mut slot = OneShot::Set("kept".to_string());
        let err = assign_once(&mut slot, "title", "").unwrap_err();
        assert!(matches!(err, ModelError::Immutable(_)));
    }

    #[test]
    fn stored_text_rejects_non_text_storage_class() {
        let err = stored_text("author name", ValueRef::Blob(&[0x00])).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::Type);
        assert_eq!(stored_text("author name", ValueRef::Text(b"Ann")).unwrap(), "Ann");
    }

    #[test]
    fn validation_error_message_names_kind() {
        let err = ValidationError::new("magazine category", ValidationErrorKind::Empty);
        assert_eq!(
            err.to_string(),
            "invalid magazine category (empty): must be longer than 0 characters"
        );
    }
}
