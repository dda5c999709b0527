//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::Duration;

use crate::{
    Error,
    auth::{DEFAULT_TOKEN_DURATION, TokenKeys},
    db,
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store for managing [categories](crate::models::Category).
    pub category_store: SQLiteCategoryStore,
    /// The store for managing user [transactions](crate::models::Transaction).
    pub transaction_store: SQLiteTransactionStore,
    /// The store for managing [users](crate::models::User).
    pub user_store: SQLiteUserStore,
    /// The keys used for signing and verifying auth tokens.
    pub token_keys: TokenKeys,
    /// The duration for which auth tokens are valid.
    pub token_duration: Duration,
}

impl AppState {
    /// Create a new [AppState].
    ///
    /// Initializes the database schema on `db_connection` and seeds the
    /// default categories if none exist yet.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::SqlError] if the schema could not
    /// be created or the seed data could not be inserted.
    pub fn new(db_connection: Connection, token_secret: &str) -> Result<Self, Error> {
        db::initialize(&db_connection)?;
        db::seed_default_categories(&db_connection)?;

        let db_connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            category_store: SQLiteCategoryStore::new(db_connection.clone()),
            transaction_store: SQLiteTransactionStore::new(db_connection.clone()),
            user_store: SQLiteUserStore::new(db_connection),
            token_keys: TokenKeys::from_secret(token_secret),
            token_duration: DEFAULT_TOKEN_DURATION,
        })
    }
}
