//! The category operations, independent of the HTTP layer.

use crate::{
    Error,
    auth::ownership::can_modify_category,
    models::{
        Category, CategoryName, CategoryOwnership, DatabaseID, NewCategory, TransactionType,
        UserID,
    },
    stores::{CategoryStore, CategoryUpdate, TransactionStore},
};

/// The categories visible to the user: their own plus the defaults.
pub fn list_visible(store: &impl CategoryStore, user_id: UserID) -> Result<Vec<Category>, Error> {
    store.get_visible(user_id)
}

/// Same as [list_visible], filtered by category type.
pub fn list_visible_by_type(
    store: &impl CategoryStore,
    user_id: UserID,
    category_type: TransactionType,
) -> Result<Vec<Category>, Error> {
    store.get_visible_by_type(user_id, category_type)
}

/// Create a category owned by `user_id`.
///
/// Categories created through the API are always owned. Default categories
/// only come from the seed data at startup.
pub fn create_category(
    store: &impl CategoryStore,
    user_id: UserID,
    name: CategoryName,
    description: Option<String>,
    color: String,
    category_type: TransactionType,
) -> Result<Category, Error> {
    store.create(NewCategory {
        name,
        description,
        color,
        category_type,
        ownership: CategoryOwnership::Owned(user_id),
    })
}

/// Overwrite the mutable fields of the category with `category_id` on behalf
/// of `user_id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::CategoryNotFound] if `category_id` does not refer to a valid category,
/// - [Error::CategoryModificationDenied] if the category is a default category
///   or belongs to another user.
pub fn update_category(
    store: &impl CategoryStore,
    user_id: UserID,
    category_id: DatabaseID,
    update: CategoryUpdate,
) -> Result<Category, Error> {
    let category = store.get(category_id)?;

    if !can_modify_category(user_id, &category) {
        return Err(Error::CategoryModificationDenied);
    }

    store.update(category_id, update)
}

/// Delete the category with `category_id` on behalf of `user_id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::CategoryNotFound] if `category_id` does not refer to a valid category,
/// - [Error::CategoryModificationDenied] if the category is a default category
///   or belongs to another user,
/// - [Error::CategoryInUse] if any transaction still references the category.
pub fn delete_category(
    category_store: &impl CategoryStore,
    transaction_store: &impl TransactionStore,
    user_id: UserID,
    category_id: DatabaseID,
) -> Result<(), Error> {
    let category = category_store.get(category_id)?;

    if !can_modify_category(user_id, &category) {
        return Err(Error::CategoryModificationDenied);
    }

    if transaction_store.count_by_category(category_id)? > 0 {
        return Err(Error::CategoryInUse);
    }

    category_store.delete(category_id)
}
