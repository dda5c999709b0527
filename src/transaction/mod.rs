//! Recording, listing and summarising transactions.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod get_endpoint;
mod list_endpoint;
mod models;
mod summary_endpoint;
mod update_endpoint;

pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use get_endpoint::get_transaction_endpoint;
pub use list_endpoint::{
    get_transactions, get_transactions_by_date_range, get_transactions_by_month,
    get_transactions_by_type,
};
pub use summary_endpoint::{get_current_summary, get_summary_by_month};
pub use update_endpoint::update_transaction_endpoint;
