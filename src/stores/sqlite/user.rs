//! Implements a SQLite backed user store.
use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use email_address::EmailAddress;
use rusqlite::{Connection, Row, types::Type};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{NewUser, PasswordHash, User, UserID, Username},
    stores::UserStore,
};

/// Stores users in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const USER_COLUMNS: &str = "id, username, email, password, full_name, currency";

impl UserStore for SQLiteUserStore {
    /// Create a new user in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateUsername] if the username is already taken,
    /// - [Error::DuplicateEmail] if the email is already in use,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&self, new_user: NewUser) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO user (username, email, password, full_name, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING {USER_COLUMNS}"
            ))?
            .query_row(
                (
                    new_user.username.as_ref(),
                    new_user.email.to_string(),
                    new_user.password_hash.to_string(),
                    &new_user.full_name,
                    time::OffsetDateTime::now_utc(),
                ),
                Self::map_row,
            )?;

        Ok(user)
    }

    /// Retrieve the user with `username` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if no user has that username,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get_by_username(&self, username: &str) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {USER_COLUMNS} FROM user WHERE username = :username"
            ))?
            .query_row(&[(":username", username)], Self::map_row)?;

        Ok(user)
    }

    /// Set the preferred currency of the user with `user_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `user_id` does not refer to a valid user,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update_currency(&self, user_id: UserID, currency: &str) -> Result<(), Error> {
        let rows_affected = self.connection.lock().unwrap().execute(
            "UPDATE user SET currency = ?1 WHERE id = ?2",
            (currency, user_id.as_i64()),
        )?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    username TEXT UNIQUE NOT NULL,
                    email TEXT UNIQUE NOT NULL,
                    password TEXT NOT NULL,
                    full_name TEXT NOT NULL,
                    currency TEXT NOT NULL DEFAULT 'USD',
                    created_at TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let username: String = row.get(offset + 1)?;
        let raw_email: String = row.get(offset + 2)?;
        let password_hash: String = row.get(offset + 3)?;
        let full_name = row.get(offset + 4)?;
        let currency = row.get(offset + 5)?;

        let email = EmailAddress::from_str(&raw_email).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(offset + 2, Type::Text, Box::new(error))
        })?;

        Ok(User::new(
            UserID::new(id),
            Username::new_unchecked(&username),
            email,
            PasswordHash::new_unchecked(&password_hash),
            full_name,
            currency,
        ))
    }
}
