//! This file defines the type `Transaction`, the core type of the expense tracking part of the
//! application, along with the fixed-point `Amount` newtype and the income/expense kind.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    models::{DatabaseID, UserID},
};

/// Whether a transaction (or a category of transactions) records money earned
/// or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Money earned, e.g. wages or dividends.
    Income,
    /// Money spent, e.g. groceries or rent.
    Expense,
}

impl TransactionType {
    /// The canonical wire and storage representation of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(format!("unknown transaction type \"{other}\"")),
        }
    }
}

/// A positive fixed-point money amount with at most two fractional digits.
///
/// Amounts and their sums always use decimal arithmetic so that aggregation
/// never accumulates binary floating point rounding drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Create a validated amount.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if `value` is zero or negative, or has
    /// more than two decimal places.
    pub fn new(value: Decimal) -> Result<Self, Error> {
        if value <= Decimal::ZERO {
            return Err(Error::validation(
                "amount",
                "Amount must be greater than 0",
            ));
        }

        if value.normalize().scale() > 2 {
            return Err(Error::validation(
                "amount",
                "Amount cannot have more than 2 decimal places",
            ));
        }

        Ok(Self(value))
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure the value is positive with at most two
    /// decimal places.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    /// The amount as a decimal for arithmetic.
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The owning user and the ID are fixed at creation; [Transaction::update_details]
/// deliberately cannot touch them.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: DatabaseID,
    amount: Amount,
    description: String,
    date: Date,
    transaction_type: TransactionType,
    category_id: DatabaseID,
    user_id: UserID,
    notes: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Transaction {
    /// Recreate a transaction from its stored parts.
    ///
    /// This is intended for store implementations mapping database rows.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: DatabaseID,
        amount: Amount,
        description: String,
        date: Date,
        transaction_type: TransactionType,
        category_id: DatabaseID,
        user_id: UserID,
        notes: Option<String>,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            amount,
            description,
            date,
            transaction_type,
            category_id,
            user_id,
            notes,
            created_at,
            updated_at,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The amount of money spent or earned in this transaction.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// A text description of what the transaction was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Whether this transaction records income or an expense.
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The category that describes this transaction.
    pub fn category_id(&self) -> DatabaseID {
        self.category_id
    }

    /// The ID of the user that owns this transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// Free-form notes attached to the transaction.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// When the transaction was first recorded.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// When the transaction was last modified.
    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// Overwrite the mutable fields of the transaction and refresh the
    /// modification timestamp.
    ///
    /// The ID and the owning user are immutable after creation, so this
    /// method does not take them.
    pub fn update_details(
        &mut self,
        amount: Amount,
        description: String,
        date: Date,
        transaction_type: TransactionType,
        category_id: DatabaseID,
        notes: Option<String>,
    ) {
        self.amount = amount;
        self.description = description;
        self.date = date;
        self.transaction_type = transaction_type;
        self.category_id = category_id;
        self.notes = notes;
        self.updated_at = OffsetDateTime::now_utc();
    }
}

/// The data needed to record a new transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// How much money was spent or earned.
    pub amount: Amount,
    /// What the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// Whether the transaction records income or an expense.
    pub transaction_type: TransactionType,
    /// The category describing the transaction.
    pub category_id: DatabaseID,
    /// The user recording the transaction.
    pub user_id: UserID,
    /// Optional free-form notes.
    pub notes: Option<String>,
}
