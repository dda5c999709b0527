//! Contains traits and implementations for objects that store the domain [models](crate::models).

mod category;
mod transaction;
mod user;

pub mod sqlite;

pub use category::{CategoryStore, CategoryUpdate};
pub use transaction::{TransactionQuery, TransactionStore};
pub use user::UserStore;
