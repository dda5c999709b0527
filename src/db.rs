//! This module defines the traits for mapping domain models to the application's database,
//! the schema initialization, and the one-time seeding of the default categories.

use rusqlite::{Connection, Error as SqlError, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    models::TransactionType,
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore, SQLiteUserStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if the table already exists or if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), SqlError>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a concrete rust type.
pub trait MapRow {
    /// The type that each row maps to.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, SqlError> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type.
    ///
    /// The `offset` indicates which column the row should be read from.
    /// This is useful in cases where tables have been joined and you want to construct two different types from the one query.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, SqlError>;
}

/// Set up the database tables for the domain models.
///
/// # Errors
/// Returns an [Error::SqlError] if the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute("PRAGMA foreign_keys = ON;", ())?;

    SQLiteUserStore::create_table(connection)?;
    SQLiteCategoryStore::create_table(connection)?;
    SQLiteTransactionStore::create_table(connection)?;

    Ok(())
}

/// The default expense categories seeded at first startup: name, description, color.
pub const DEFAULT_EXPENSE_CATEGORIES: [(&str, &str, &str); 10] = [
    ("Food & Dining", "Restaurant, groceries, food delivery", "#FF6B6B"),
    ("Transportation", "Gas, public transport, taxi, uber", "#4ECDC4"),
    ("Shopping", "Clothing, electronics, personal items", "#45B7D1"),
    ("Entertainment", "Movies, games, concerts, subscriptions", "#FD79A8"),
    ("Bills & Utilities", "Electricity, water, internet, phone", "#FDCB6E"),
    ("Healthcare", "Medical expenses, pharmacy, insurance", "#6C5CE7"),
    ("Education", "Books, courses, school fees", "#A29BFE"),
    ("Travel", "Hotels, flights, vacation expenses", "#00B894"),
    ("Personal Care", "Haircut, cosmetics, spa", "#E17055"),
    ("Home & Garden", "Furniture, repairs, gardening", "#81ECEC"),
];

/// The default income categories seeded at first startup: name, description, color.
pub const DEFAULT_INCOME_CATEGORIES: [(&str, &str, &str); 7] = [
    ("Salary", "Monthly salary, wages", "#00B894"),
    ("Freelance", "Freelance work, consulting", "#FDCB6E"),
    ("Business", "Business income, profits", "#6C5CE7"),
    ("Investment", "Dividends, interest, capital gains", "#A29BFE"),
    ("Bonus", "Work bonus, incentives", "#FD79A8"),
    ("Gift", "Money gifts, cash gifts", "#FF6B6B"),
    ("Other Income", "Miscellaneous income", "#74B9FF"),
];

/// Seed the default categories if none exist yet.
///
/// Seeding is skipped entirely when at least one default category is already
/// present, so running this at every startup is idempotent.
///
/// Returns the number of categories created.
///
/// # Errors
/// Returns an [Error::SqlError] if the categories could not be inserted.
pub fn seed_default_categories(connection: &Connection) -> Result<usize, Error> {
    let default_count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM category WHERE user_id IS NULL;",
        [],
        |row| row.get(0),
    )?;

    if default_count > 0 {
        tracing::debug!("Default categories already present, skipping seeding.");
        return Ok(0);
    }

    let now = OffsetDateTime::now_utc();
    let mut statement = connection.prepare(
        "INSERT INTO category (name, description, color, type, user_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, NULL, ?5, ?6);",
    )?;

    let mut created = 0;

    for (category_type, categories) in [
        (
            TransactionType::Expense,
            DEFAULT_EXPENSE_CATEGORIES.as_slice(),
        ),
        (TransactionType::Income, DEFAULT_INCOME_CATEGORIES.as_slice()),
    ] {
        for (name, description, color) in categories {
            statement.execute((name, description, color, category_type.as_str(), now, now))?;
            created += 1;
        }
    }

    tracing::info!("Seeded {created} default categories.");

    Ok(created)
}
