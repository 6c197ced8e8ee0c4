//! Magazine entity.
//!
//! # Invariants
//! - `name` and `category` stay reassignable after persistence, including
//!   while the magazine is shared with articles through an `Rc`.
//! - `id` is `None` until the first successful insert.

use super::field::{require_text, ValidationError};
use serde::Serialize;
use std::cell::{Cell, RefCell};

/// Store-generated magazine key.
pub type MagazineId = i64;

const NAME_FIELD: &str = "magazine name";
const CATEGORY_FIELD: &str = "magazine category";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Magazine {
    id: Cell<Option<MagazineId>>,
    name: RefCell<String>,
    category: RefCell<String>,
}

impl Magazine {
    /// Creates an unsaved magazine. Name is checked before category.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = require_text(NAME_FIELD, name)?;
        let category = require_text(CATEGORY_FIELD, category)?;
        Ok(Self {
            id: Cell::new(None),
            name: RefCell::new(name),
            category: RefCell::new(category),
        })
    }

    /// Rebuilds a magazine from a stored row without re-validating it.
    pub fn from_stored(id: MagazineId, name: String, category: String) -> Self {
        Self {
            id: Cell::new(Some(id)),
            name: RefCell::new(name),
            category: RefCell::new(category),
        }
    }

    pub fn id(&self) -> Option<MagazineId> {
        self.id.get()
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    pub fn category(&self) -> String {
        self.category.borrow().clone()
    }

    /// Replaces the name. On error the current value is kept.
    pub fn set_name(&self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = require_text(NAME_FIELD, value)?;
        self.name.replace(value);
        Ok(())
    }

    /// Replaces the category. On error the current value is kept.
    pub fn set_category(&self, value: impl Into<String>) -> Result<(), ValidationError> {
        let value = require_text(CATEGORY_FIELD, value)?;
        self.category.replace(value);
        Ok(())
    }

    pub(crate) fn assign_id(&self, id: MagazineId) {
        self.id.set(Some(id));
    }
}

#[cfg(test)]
mod tests {
    use super::Magazine;
    use crate::model::field::ValidationErrorKind;
    use std::rc::Rc;

    #[test]
    fn fields_are_reassignable() {
        let magazine = Magazine::new("Tech Today", "Technology").unwrap();
        magazine.set_name("Tech Tomorrow").unwrap();
        magazine.set_category("Science").unwrap();
        assert_eq!(magazine.name(), "Tech Tomorrow");
        assert_eq!(magazine.category(), "Science");
    }

    #[test]
    fn shared_magazine_is_still_reassignable() {
        let magazine = Rc::new(Magazine::new("Tech Today", "Technology").unwrap());
        let shared = Rc::clone(&magazine);

        magazine.set_category("Science").unwrap();
        assert_eq!(shared.category(), "Science");
    }

    #[test]
    fn rejected_assignment_keeps_previous_value() {
        let magazine = Magazine::new("Tech Today", "Technology").unwrap();
        let err = magazine.set_category("").unwrap_err();
        assert_eq!(err.field, "magazine category");
        assert_eq!(err.kind, ValidationErrorKind::Empty);
        assert_eq!(magazine.category(), "Technology");
    }
}
