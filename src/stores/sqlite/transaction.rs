//! Implements a SQLite backed transaction store.
use std::{
    str::FromStr,
    sync::{Arc, Mutex},
};

use rust_decimal::Decimal;
use rusqlite::{Connection, Row, params_from_iter, types::Type, types::Value};
use time::OffsetDateTime;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Amount, DatabaseID, NewTransaction, Transaction, TransactionType, UserID},
    stores::{TransactionQuery, TransactionStore},
};

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction depends on the [User](crate::models::User) and
/// [Category](crate::models::Category) models, these models must be set up in the database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

const TRANSACTION_COLUMNS: &str =
    "id, amount, description, date, type, category_id, user_id, notes, created_at, updated_at";

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::CategoryNotFound] if `category_id` does not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let now = OffsetDateTime::now_utc();

        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "INSERT INTO \"transaction\" (amount, description, date, type, category_id, user_id, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                (
                    new_transaction.amount.to_string(),
                    &new_transaction.description,
                    new_transaction.date,
                    new_transaction.transaction_type.as_str(),
                    new_transaction.category_id,
                    new_transaction.user_id.as_i64(),
                    &new_transaction.notes,
                    now,
                    now,
                ),
                Self::map_row,
            )
            .map_err(|error| match error {
                // Code 787 occurs when a FOREIGN KEY constraint failed.
                // The client tried to add a transaction for a non-existent category.
                rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 787 => {
                    Error::CategoryNotFound(new_transaction.category_id)
                }
                error => error.into(),
            })?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::TransactionNotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseID) -> Result<Transaction, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], Self::map_row)
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::TransactionNotFound(id),
                error => error.into(),
            })
    }

    /// Query for the transactions of the user with `user_id`.
    ///
    /// Results are ordered by date descending, with ties broken by insertion
    /// order.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn get_query(
        &self,
        user_id: UserID,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\""
        )];
        let mut where_clause_parts = vec!["user_id = ?1".to_string()];
        let mut query_parameters = vec![Value::Integer(user_id.as_i64())];

        if let Some(date_range) = query.date_range {
            where_clause_parts.push(format!(
                "date BETWEEN ?{} AND ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(Value::Text(date_range.start().to_string()));
            query_parameters.push(Value::Text(date_range.end().to_string()));
        }

        if let Some(transaction_type) = query.transaction_type {
            where_clause_parts.push(format!("type = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(transaction_type.as_str().to_string()));
        }

        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
        query_string_parts.push("ORDER BY date DESC, id ASC".to_string());

        if let Some((offset, limit)) = query.offset_limit {
            query_string_parts.push(format!("LIMIT {limit} OFFSET {offset}"));
        }

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .unwrap()
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Persist the current state of an already stored transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::TransactionNotFound] if the transaction is not in the database,
    /// - [Error::CategoryNotFound] if the transaction's category does not exist,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(&self, transaction: &Transaction) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute(
                "UPDATE \"transaction\"
                 SET amount = ?1, description = ?2, date = ?3, type = ?4, category_id = ?5, notes = ?6, updated_at = ?7
                 WHERE id = ?8",
                (
                    transaction.amount().to_string(),
                    transaction.description(),
                    transaction.date(),
                    transaction.transaction_type().as_str(),
                    transaction.category_id(),
                    transaction.notes(),
                    transaction.updated_at(),
                    transaction.id(),
                ),
            )
            .map_err(|error| match error {
                rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 787 => {
                    Error::CategoryNotFound(transaction.category_id())
                }
                error => Error::SqlError(error),
            })?;

        if rows_affected == 0 {
            return Err(Error::TransactionNotFound(transaction.id()));
        }

        Ok(())
    }

    /// Remove the transaction with `id` from the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::TransactionNotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&self, id: DatabaseID) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", (id,))?;

        if rows_affected == 0 {
            return Err(Error::TransactionNotFound(id));
        }

        Ok(())
    }

    /// The number of transactions referencing the category with `category_id`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is a SQL error.
    fn count_by_category(&self, category_id: DatabaseID) -> Result<i64, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row(
                "SELECT COUNT(id) FROM \"transaction\" WHERE category_id = ?1",
                (category_id,),
                |row| row.get(0),
            )
            .map_err(|error| error.into())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    amount TEXT NOT NULL,
                    description TEXT NOT NULL,
                    date TEXT NOT NULL,
                    type TEXT NOT NULL,
                    category_id INTEGER NOT NULL,
                    user_id INTEGER NOT NULL,
                    notes TEXT,
                    created_at TEXT NOT NULL,
                    updated_at TEXT NOT NULL,
                    FOREIGN KEY(category_id) REFERENCES category(id),
                    FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let raw_amount: String = row.get(offset + 1)?;
        let description = row.get(offset + 2)?;
        let date = row.get(offset + 3)?;
        let raw_type: String = row.get(offset + 4)?;
        let category_id = row.get(offset + 5)?;
        let user_id = row.get(offset + 6)?;
        let notes = row.get(offset + 7)?;
        let created_at = row.get(offset + 8)?;
        let updated_at = row.get(offset + 9)?;

        let amount = Decimal::from_str(&raw_amount).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(offset + 1, Type::Text, Box::new(error))
        })?;
        let transaction_type = TransactionType::from_str(&raw_type).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(offset + 4, Type::Text, error.into())
        })?;

        Ok(Transaction::new(
            id,
            Amount::new_unchecked(amount),
            description,
            date,
            transaction_type,
            category_id,
            UserID::new(user_id),
            notes,
            created_at,
            updated_at,
        ))
    }
}
