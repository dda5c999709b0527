//! This file defines a user of the application and its supporting types.

use std::fmt::Display;

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{Error, models::PasswordHash};

/// A newtype wrapper for integer user IDs.
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a user ID from an integer.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The user ID as a plain integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The name a user logs in with and that tokens are issued for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Username(String);

/// The minimum number of characters a username must have.
const USERNAME_MIN_LENGTH: usize = 3;
/// The maximum number of characters a username may have.
const USERNAME_MAX_LENGTH: usize = 20;

impl Username {
    /// Create a username from a string.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] if `name` is shorter
    /// than 3 or longer than 20 characters.
    pub fn new(name: &str) -> Result<Self, Error> {
        let length = name.chars().count();

        if (USERNAME_MIN_LENGTH..=USERNAME_MAX_LENGTH).contains(&length) {
            Ok(Self(name.to_string()))
        } else {
            Err(Error::validation(
                "username",
                "Username must be between 3 and 20 characters",
            ))
        }
    }

    /// Create a username without validation.
    ///
    /// The caller should ensure that the string meets the username length bounds.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the length invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user of the application.
///
/// Users are created through [NewUser] and the user store; existing users are
/// retrieved from the store by username.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserID,
    username: Username,
    email: EmailAddress,
    password_hash: PasswordHash,
    full_name: String,
    currency: String,
}

impl User {
    /// Recreate a user from its stored parts.
    ///
    /// This is intended for store implementations mapping database rows.
    pub fn new(
        id: UserID,
        username: Username,
        email: EmailAddress,
        password_hash: PasswordHash,
        full_name: String,
        currency: String,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            full_name,
            currency,
        }
    }

    /// The user's ID in the database.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The name the user logs in with.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// The email address associated with the user.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// The user's password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// The user's display name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// The currency code the user prefers for displaying amounts.
    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// The data needed to register a new user.
///
/// The currency defaults to `USD` at insertion and can be changed later by
/// the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// The name the user will log in with. Must be unique.
    pub username: Username,
    /// The user's email address. Must be unique.
    pub email: EmailAddress,
    /// The user's hashed password.
    pub password_hash: PasswordHash,
    /// The user's display name.
    pub full_name: String,
}
