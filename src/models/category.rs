//! This file defines the `Category` type and the types needed to create a category.
//! A category classifies transactions as a particular kind of income or expense.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    models::{DatabaseID, TransactionType, UserID},
};

/// The minimum number of characters a category name must have.
const CATEGORY_NAME_MIN_LENGTH: usize = 2;
/// The maximum number of characters a category name may have.
const CATEGORY_NAME_MAX_LENGTH: usize = 100;

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if `name` is shorter
    /// than 2 or longer than 100 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let length = name.chars().count();

        if (CATEGORY_NAME_MIN_LENGTH..=CATEGORY_NAME_MAX_LENGTH).contains(&length) {
            Ok(Self(name.to_string()))
        } else {
            Err(Error::validation(
                "name",
                "Category name must be between 2 and 100 characters",
            ))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string meets the name length bounds.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the length invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who a category belongs to.
///
/// Making the owner a tagged variant instead of a nullable foreign key means
/// "no owner implies globally visible and read-only" cannot be violated by a
/// half-initialized record: a default category simply has no owner to check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryOwnership {
    /// A system-seeded category, visible to every user and modifiable by none.
    Default,
    /// A user-created category, visible and modifiable only by its owner.
    Owned(UserID),
}

impl CategoryOwnership {
    /// Whether this is a system-seeded default category.
    pub fn is_default(&self) -> bool {
        matches!(self, CategoryOwnership::Default)
    }

    /// The owning user, if the category has one.
    pub fn owner(&self) -> Option<UserID> {
        match self {
            CategoryOwnership::Default => None,
            CategoryOwnership::Owned(user_id) => Some(*user_id),
        }
    }
}

/// A category for expenses and income, e.g., 'Groceries', 'Salary'.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    id: DatabaseID,
    name: CategoryName,
    description: Option<String>,
    color: String,
    category_type: TransactionType,
    ownership: CategoryOwnership,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Category {
    /// Recreate a category from its stored parts.
    ///
    /// This is intended for store implementations mapping database rows.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: DatabaseID,
        name: CategoryName,
        description: Option<String>,
        color: String,
        category_type: TransactionType,
        ownership: CategoryOwnership,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            name,
            description,
            color,
            category_type,
            ownership,
            created_at,
            updated_at,
        }
    }

    /// The ID of the category.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The name of the category.
    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    /// A short description of what belongs in the category.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The hex color used to display the category.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Whether the category classifies income or expenses.
    pub fn category_type(&self) -> TransactionType {
        self.category_type
    }

    /// Who the category belongs to.
    pub fn ownership(&self) -> CategoryOwnership {
        self.ownership
    }

    /// When the category was created.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// When the category was last modified.
    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }
}

/// The data needed to create a new category.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    /// The name of the category.
    pub name: CategoryName,
    /// A short description of what belongs in the category.
    pub description: Option<String>,
    /// The hex color used to display the category.
    pub color: String,
    /// Whether the category classifies income or expenses.
    pub category_type: TransactionType,
    /// Who the category belongs to.
    pub ownership: CategoryOwnership,
}
