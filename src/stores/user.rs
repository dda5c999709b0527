//! Defines the user store trait.

use crate::{
    Error,
    models::{NewUser, User, UserID},
};

/// Creates and retrieves the registered users of the application.
pub trait UserStore: Send + Sync {
    /// Create a new user and add it to the store.
    ///
    /// The user's preferred currency starts as `USD`.
    fn create(&self, new_user: NewUser) -> Result<User, Error>;

    /// Get a user by their username.
    fn get_by_username(&self, username: &str) -> Result<User, Error>;

    /// Set the preferred currency of the user with `user_id`.
    fn update_currency(&self, user_id: UserID, currency: &str) -> Result<(), Error>;
}
