//! Contains the domain models of the application and their invariants.

mod category;
mod password;
mod transaction;
mod user;

pub use category::{Category, CategoryName, CategoryOwnership, NewCategory};
pub use password::{PasswordHash, ValidatedPassword};
pub use transaction::{Amount, NewTransaction, Transaction, TransactionType};
pub use user::{NewUser, User, UserID, Username};

/// An alias for the integer type used for database row IDs.
pub type DatabaseID = i64;
