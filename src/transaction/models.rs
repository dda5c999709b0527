//! The request and response bodies for the transaction endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    models::{Amount, Category, DatabaseID, Transaction, TransactionType},
};

/// The minimum number of characters a transaction description must have.
const DESCRIPTION_MIN_LENGTH: usize = 2;
/// The maximum number of characters a transaction description may have.
const DESCRIPTION_MAX_LENGTH: usize = 255;
/// The maximum number of characters the notes field may have.
const NOTES_MAX_LENGTH: usize = 500;

/// The data for recording or updating a transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    /// How much money was spent or earned.
    pub amount: Decimal,
    /// What the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub transaction_date: Date,
    /// Whether money was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category the transaction belongs to.
    pub category_id: DatabaseID,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl TransactionRequest {
    /// Validate the request fields, collecting the failures.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] listing every field
    /// that failed.
    pub fn validate(&self) -> Result<(Amount, String, Option<String>), Error> {
        let mut details = Vec::new();

        let amount = Amount::new(self.amount);
        if let Err(Error::Validation(amount_details)) = &amount {
            details.extend(amount_details.iter().cloned());
        }

        let description_length = self.description.chars().count();
        if !(DESCRIPTION_MIN_LENGTH..=DESCRIPTION_MAX_LENGTH).contains(&description_length) {
            details.push(
                "description: Description must be between 2 and 255 characters".to_string(),
            );
        }

        if let Some(notes) = &self.notes
            && notes.chars().count() > NOTES_MAX_LENGTH
        {
            details.push("notes: Notes must be at most 500 characters".to_string());
        }

        match amount {
            Ok(amount) if details.is_empty() => {
                Ok((amount, self.description.clone(), self.notes.clone()))
            }
            _ => Err(Error::Validation(details)),
        }
    }
}

/// A transaction as returned to the client, with its category denormalised
/// so listings do not require a second request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    /// The transaction's ID.
    pub id: DatabaseID,
    /// How much money was spent or earned.
    pub amount: Decimal,
    /// What the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub transaction_date: Date,
    /// Whether money was spent or earned.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The ID of the category the transaction belongs to.
    pub category_id: DatabaseID,
    /// The name of the category the transaction belongs to.
    pub category_name: String,
    /// The display color of the category the transaction belongs to.
    pub category_color: String,
    /// Free-form notes.
    pub notes: Option<String>,
    /// When the transaction was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl TransactionResponse {
    /// Combine a transaction with its category into a response body.
    pub fn new(transaction: &Transaction, category: &Category) -> Self {
        Self {
            id: transaction.id(),
            amount: transaction.amount().as_decimal(),
            description: transaction.description().to_string(),
            transaction_date: transaction.date(),
            transaction_type: transaction.transaction_type(),
            category_id: transaction.category_id(),
            category_name: category.name().to_string(),
            category_color: category.color().to_string(),
            notes: transaction.notes().map(str::to_string),
            created_at: transaction.created_at(),
            updated_at: transaction.updated_at(),
        }
    }
}

/// The income, expense and balance of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// The sum of all income transactions in the month.
    pub income: Decimal,
    /// The sum of all expense transactions in the month.
    pub expense: Decimal,
    /// Income minus expense.
    pub balance: Decimal,
    /// The calendar year the summary covers.
    pub year: i32,
    /// The calendar month the summary covers, from 1 for January.
    pub month: u8,
}
