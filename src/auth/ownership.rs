//! Pure predicates that decide whether a user may use or modify a resource.
//!
//! These functions never do I/O and never fail; the calling service turns a
//! `false` answer into the appropriate authorization error.

use crate::models::{Category, CategoryOwnership, Transaction, UserID};

/// Whether `user_id` may attach transactions to `category`.
///
/// Default categories are usable by everyone; owned categories only by their
/// owner.
pub fn can_use_category(user_id: UserID, category: &Category) -> bool {
    match category.ownership() {
        CategoryOwnership::Default => true,
        CategoryOwnership::Owned(owner) => owner == user_id,
    }
}

/// Whether `user_id` may update or delete `category`.
///
/// Default categories are read-only for everyone, including the seeding
/// process once they exist.
pub fn can_modify_category(user_id: UserID, category: &Category) -> bool {
    match category.ownership() {
        CategoryOwnership::Default => false,
        CategoryOwnership::Owned(owner) => owner == user_id,
    }
}

/// Whether `user_id` may read, update or delete `transaction`.
pub fn can_modify_transaction(user_id: UserID, transaction: &Transaction) -> bool {
    transaction.user_id() == user_id
}
