//! SQLite backed implementations of the store traits.

pub mod category;
pub mod transaction;
pub mod user;

pub use category::SQLiteCategoryStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;
