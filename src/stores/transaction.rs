//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error,
    models::{DatabaseID, NewTransaction, Transaction, TransactionType, UserID},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore: Send + Sync {
    /// Create a new transaction in the store.
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store by its ID.
    fn get(&self, id: DatabaseID) -> Result<Transaction, Error>;

    /// Retrieve the transactions of the user with `user_id` in the way
    /// defined by `query`.
    ///
    /// Results are ordered by transaction date descending, with ties broken
    /// by insertion order so repeated queries are stable.
    fn get_query(
        &self,
        user_id: UserID,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error>;

    /// Persist the current state of an already stored transaction.
    fn update(&self, transaction: &Transaction) -> Result<(), Error>;

    /// Remove the transaction with `id` from the store.
    fn delete(&self, id: DatabaseID) -> Result<(), Error>;

    /// The number of transactions that reference the category with
    /// `category_id`, across all users.
    ///
    /// Used to block the deletion of categories that are still in use.
    fn count_by_category(&self, category_id: DatabaseID) -> Result<i64, Error>;
}

/// Defines how transactions should be fetched from [TransactionStore::get_query].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    /// Include only transactions dated within `date_range` (inclusive).
    pub date_range: Option<RangeInclusive<Date>>,
    /// Include only transactions of the given type.
    pub transaction_type: Option<TransactionType>,
    /// Selects up to `limit` transactions after skipping `offset` rows.
    /// `None` returns all matching transactions.
    pub offset_limit: Option<(u64, u64)>,
}
