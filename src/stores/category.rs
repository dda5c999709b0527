//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID, NewCategory, TransactionType, UserID},
};

/// The mutable fields of a category, used for updates.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUpdate {
    /// The new name of the category.
    pub name: CategoryName,
    /// The new description of the category.
    pub description: Option<String>,
    /// The new display color of the category.
    pub color: String,
    /// The new type of the category.
    pub category_type: TransactionType,
}

/// Creates and retrieves transaction categories.
pub trait CategoryStore: Send + Sync {
    /// Create a new category and add it to the store.
    fn create(&self, new_category: NewCategory) -> Result<Category, Error>;

    /// Get a category by its ID.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error>;

    /// Get the categories visible to a user: their own plus all default
    /// categories, ordered by name ascending (case-sensitive).
    fn get_visible(&self, user_id: UserID) -> Result<Vec<Category>, Error>;

    /// Same as [CategoryStore::get_visible], filtered by category type.
    fn get_visible_by_type(
        &self,
        user_id: UserID,
        category_type: TransactionType,
    ) -> Result<Vec<Category>, Error>;

    /// Overwrite the mutable fields of the category with `category_id` and
    /// refresh its modification timestamp.
    fn update(&self, category_id: DatabaseID, update: CategoryUpdate) -> Result<Category, Error>;

    /// Remove the category with `category_id` from the store.
    fn delete(&self, category_id: DatabaseID) -> Result<(), Error>;
}
