//! Listing, creating, updating and deleting transaction categories.

mod core;
mod create_endpoint;
mod delete_endpoint;
mod list_endpoint;
mod models;
mod update_endpoint;

pub use create_endpoint::create_category_endpoint;
pub use delete_endpoint::delete_category_endpoint;
pub use list_endpoint::{get_categories, get_categories_by_type};
pub use update_endpoint::update_category_endpoint;
