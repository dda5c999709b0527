//! Implements a SQLite backed category store.
use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{
        Category, CategoryName, CategoryOwnership, DatabaseID, NewCategory, TransactionType, UserID,
    },
    stores::{CategoryStore, CategoryUpdate},
};

/// Stores transaction categories in a SQLite database.
///
/// Note that because an owned category refers to a [User](crate::models::User),
/// the user model must be set up in the database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const CATEGORY_COLUMNS: &str = "id, name, description, color, type, user_id, created_at, updated_at";

impl CategoryStore for SQLiteCategoryStore {
    /// Create a new category in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn create(&self, new_category: NewCategory) -> Result<Category, Error> {
        let now = OffsetDateTime::now_utc();

        let category = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO category (name, description, color, type, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {CATEGORY_COLUMNS}"
            ))?
            .query_row(
                (
                    new_category.name.as_ref(),
                    &new_category.description,
                    &new_category.color,
                    new_category.category_type.as_str(),
                    new_category.ownership.owner().map(|user_id| user_id.as_i64()),
                    now,
                    now,
                ),
                Self::map_row,
            )?;

        Ok(category)
    }

    /// Retrieve a category in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::CategoryNotFound] if `category_id` does not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category WHERE id = :id"
            ))?
            .query_row(&[(":id", &category_id)], Self::map_row)
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::CategoryNotFound(category_id),
                error => error.into(),
            })
    }

    /// Retrieve the categories visible to the user with `user_id`: their own
    /// categories plus all default categories, ordered by name.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_visible(&self, user_id: UserID) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category
                 WHERE user_id IS NULL OR user_id = :user_id
                 ORDER BY name ASC"
            ))?
            .query_map(&[(":user_id", &user_id.as_i64())], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(Error::SqlError))
            .collect()
    }

    /// Same as [CategoryStore::get_visible], filtered by category type.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_visible_by_type(
        &self,
        user_id: UserID,
        category_type: TransactionType,
    ) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM category
                 WHERE (user_id IS NULL OR user_id = :user_id) AND type = :type
                 ORDER BY name ASC"
            ))?
            .query_map(
                rusqlite::named_params! {
                    ":user_id": user_id.as_i64(),
                    ":type": category_type.as_str(),
                },
                Self::map_row,
            )?
            .map(|maybe_category| maybe_category.map_err(Error::SqlError))
            .collect()
    }

    /// Overwrite the mutable fields of the category with `category_id` and
    /// refresh its modification timestamp.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::CategoryNotFound] if `category_id` does not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&self, category_id: DatabaseID, update: CategoryUpdate) -> Result<Category, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "UPDATE category
                 SET name = ?1, description = ?2, color = ?3, type = ?4, updated_at = ?5
                 WHERE id = ?6
                 RETURNING {CATEGORY_COLUMNS}"
            ))?
            .query_row(
                (
                    update.name.as_ref(),
                    &update.description,
                    &update.color,
                    update.category_type.as_str(),
                    OffsetDateTime::now_utc(),
                    category_id,
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::CategoryNotFound(category_id),
                error => error.into(),
            })
    }

    /// Remove the category with `category_id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::CategoryNotFound] if `category_id` does not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&self, category_id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM category WHERE id = ?1", (category_id,))?;

        if rows_affected == 0 {
            return Err(Error::CategoryNotFound(category_id));
        }

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    description TEXT,
                    color TEXT NOT NULL,
                    type TEXT NOT NULL,
                    user_id INTEGER,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let name: String = row.get(offset + 1)?;
        let description = row.get(offset + 2)?;
        let color = row.get(offset + 3)?;
        let raw_type: String = row.get(offset + 4)?;
        let user_id: Option<i64> = row.get(offset + 5)?;
        let created_at = row.get(offset + 6)?;
        let updated_at = row.get(offset + 7)?;

        let category_type = TransactionType::from_str(&raw_type).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(offset + 4, Type::Text, error.into())
        })?;

        let ownership = match user_id {
            Some(user_id) => CategoryOwnership::Owned(UserID::new(user_id)),
            None => CategoryOwnership::Default,
        };

        Ok(Category::new(
            id,
            CategoryName::new_unchecked(&name),
            description,
            color,
            category_type,
            ownership,
            created_at,
            updated_at,
        ))
    }
}
