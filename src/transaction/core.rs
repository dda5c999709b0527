//! The transaction operations, independent of the HTTP layer.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use rust_decimal::Decimal;
use time::{Date, Month};

use crate::{
    Error,
    auth::ownership::{can_modify_transaction, can_use_category},
    models::{Amount, Category, DatabaseID, NewTransaction, Transaction, TransactionType, UserID},
    stores::{CategoryStore, TransactionQuery, TransactionStore},
};

use super::models::{MonthlySummary, TransactionResponse};

/// Record a new transaction for `user_id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::CategoryNotFound] if `category_id` does not refer to a valid category,
/// - [Error::CategoryAccessDenied] if the category belongs to another user.
#[allow(clippy::too_many_arguments)]
pub fn create_transaction(
    category_store: &impl CategoryStore,
    transaction_store: &impl TransactionStore,
    user_id: UserID,
    amount: Amount,
    description: String,
    date: Date,
    transaction_type: TransactionType,
    category_id: DatabaseID,
    notes: Option<String>,
) -> Result<Transaction, Error> {
    let category = category_store.get(category_id)?;

    if !can_use_category(user_id, &category) {
        return Err(Error::CategoryAccessDenied);
    }

    transaction_store.create(NewTransaction {
        amount,
        description,
        date,
        transaction_type,
        category_id,
        user_id,
        notes,
    })
}

/// Fetch the transaction with `transaction_id` on behalf of `user_id`.
///
/// # Errors
///
/// This function will return a:
/// - [Error::TransactionNotFound] if `transaction_id` does not refer to a
///   valid transaction,
/// - [Error::TransactionAccessDenied] if the transaction belongs to another
///   user.
pub fn get_transaction(
    store: &impl TransactionStore,
    user_id: UserID,
    transaction_id: DatabaseID,
) -> Result<Transaction, Error> {
    let transaction = store.get(transaction_id)?;

    if !can_modify_transaction(user_id, &transaction) {
        return Err(Error::TransactionAccessDenied);
    }

    Ok(transaction)
}

/// Overwrite the mutable fields of the transaction with `transaction_id` on
/// behalf of `user_id`.
///
/// Ownership of the target category is only re-checked when the update moves
/// the transaction to a different category. An update that keeps the current
/// category succeeds even if the caller could no longer pick that category
/// for a new transaction.
///
/// # Errors
///
/// This function will return a:
/// - [Error::TransactionNotFound] if `transaction_id` does not refer to a
///   valid transaction,
/// - [Error::TransactionAccessDenied] if the transaction belongs to another
///   user,
/// - [Error::CategoryNotFound] or [Error::CategoryAccessDenied] if the
///   transaction is moved to a category the caller cannot use.
#[allow(clippy::too_many_arguments)]
pub fn update_transaction(
    category_store: &impl CategoryStore,
    transaction_store: &impl TransactionStore,
    user_id: UserID,
    transaction_id: DatabaseID,
    amount: Amount,
    description: String,
    date: Date,
    transaction_type: TransactionType,
    category_id: DatabaseID,
    notes: Option<String>,
) -> Result<Transaction, Error> {
    let mut transaction = get_transaction(transaction_store, user_id, transaction_id)?;

    if category_id != transaction.category_id() {
        let category = category_store.get(category_id)?;

        if !can_use_category(user_id, &category) {
            return Err(Error::CategoryAccessDenied);
        }
    }

    transaction.update_details(amount, description, date, transaction_type, category_id, notes);
    transaction_store.update(&transaction)?;

    Ok(transaction)
}

/// Delete the transaction with `transaction_id` on behalf of `user_id`.
pub fn delete_transaction(
    store: &impl TransactionStore,
    user_id: UserID,
    transaction_id: DatabaseID,
) -> Result<(), Error> {
    let transaction = get_transaction(store, user_id, transaction_id)?;

    store.delete(transaction.id())
}

/// The inclusive date range covering the calendar month `month` of `year`.
///
/// # Errors
///
/// This function will return an [Error::Validation] if `month` is not between
/// 1 and 12 or `year` is outside the range a date can represent.
pub fn month_range(year: i32, month: u8) -> Result<RangeInclusive<Date>, Error> {
    let month = Month::try_from(month)
        .map_err(|_| Error::validation("month", "Month must be between 1 and 12"))?;

    let start = Date::from_calendar_date(year, month, 1)
        .map_err(|_| Error::validation("year", "Year is out of range"))?;
    let end = start
        .replace_day(month.length(year))
        .map_err(|_| Error::validation("year", "Year is out of range"))?;

    Ok(start..=end)
}

/// The income, expense and balance for the calendar month `month` of `year`.
///
/// The sums are computed over the user's transactions with decimal
/// arithmetic. A month without transactions of a type contributes zero.
pub fn monthly_summary(
    store: &impl TransactionStore,
    user_id: UserID,
    year: i32,
    month: u8,
) -> Result<MonthlySummary, Error> {
    let transactions = store.get_query(
        user_id,
        TransactionQuery {
            date_range: Some(month_range(year, month)?),
            ..TransactionQuery::default()
        },
    )?;

    let sum_of = |transaction_type: TransactionType| -> Decimal {
        transactions
            .iter()
            .filter(|transaction| transaction.transaction_type() == transaction_type)
            .map(|transaction| transaction.amount().as_decimal())
            .sum()
    };

    let income = sum_of(TransactionType::Income);
    let expense = sum_of(TransactionType::Expense);

    Ok(MonthlySummary {
        income,
        expense,
        balance: income - expense,
        year,
        month,
    })
}

/// Combine `transactions` with their categories into response bodies.
///
/// The categories visible to the user are fetched once so that listings do
/// not query per transaction.
pub(super) fn build_responses(
    category_store: &impl CategoryStore,
    user_id: UserID,
    transactions: &[Transaction],
) -> Result<Vec<TransactionResponse>, Error> {
    let categories: HashMap<DatabaseID, Category> = category_store
        .get_visible(user_id)?
        .into_iter()
        .map(|category| (category.id(), category))
        .collect();

    transactions
        .iter()
        .map(|transaction| {
            let category = categories
                .get(&transaction.category_id())
                .ok_or(Error::CategoryNotFound(transaction.category_id()))?;

            Ok(TransactionResponse::new(transaction, category))
        })
        .collect()
}
