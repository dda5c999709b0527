//! Authentication and authorization: signed bearer tokens, the middleware
//! that validates them, and the pure ownership predicates used by the
//! category and transaction services.

mod middleware;
pub mod ownership;
pub mod token;

pub use middleware::auth_guard;
pub use token::{DEFAULT_TOKEN_DURATION, TokenKeys, issue_token, validate_token};
