//! The API endpoint URIs.
//!
//! For endpoints that take an ID parameter, e.g., '/transactions/{transaction_id}',
//! use [format_endpoint].

/// The route for registering a new user account.
pub const REGISTER: &str = "/auth/register";
/// The route for logging in a user.
pub const LOG_IN: &str = "/auth/login";
/// The route for checking whether a token is still valid.
pub const VALIDATE_TOKEN: &str = "/auth/validate";

/// The route to list and create categories.
pub const CATEGORIES: &str = "/categories";
/// The route to list the categories of one type.
pub const CATEGORIES_BY_TYPE: &str = "/categories/type/{category_type}";
/// The route to update or delete a single category.
pub const CATEGORY: &str = "/categories/{category_id}";

/// The route to list and create transactions.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route to list transactions within a date range.
pub const TRANSACTIONS_BY_DATE_RANGE: &str = "/transactions/date-range";
/// The route to list the transactions of one type.
pub const TRANSACTIONS_BY_TYPE: &str = "/transactions/type/{transaction_type}";
/// The route to list the transactions of a calendar month.
pub const TRANSACTIONS_BY_MONTH: &str = "/transactions/monthly/{year}/{month}";
/// The route for the current month's income, expense and balance summary.
pub const SUMMARY: &str = "/transactions/summary";
/// The route for the summary of a specific calendar month.
pub const SUMMARY_BY_MONTH: &str = "/transactions/summary/{year}/{month}";

/// The route for changing the authenticated user's preferred currency.
pub const USER_CURRENCY: &str = "/users/currency";

/// Replace the first parameter in `endpoint_path` with `value`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transactions/{transaction_id}',
/// '{transaction_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII
/// characters. Paths with more than one parameter, such as
/// '/transactions/monthly/{year}/{month}', are formatted one parameter at a
/// time by calling this function repeatedly.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint<T: std::fmt::Display>(endpoint_path: &str, value: T) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        value,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::REGISTER);
        assert_endpoint_is_valid_uri(endpoints::LOG_IN);
        assert_endpoint_is_valid_uri(endpoints::VALIDATE_TOKEN);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES);
        assert_endpoint_is_valid_uri(endpoints::CATEGORIES_BY_TYPE);
        assert_endpoint_is_valid_uri(endpoints::CATEGORY);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTION);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_BY_DATE_RANGE);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_BY_TYPE);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS_BY_MONTH);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY_BY_MONTH);
        assert_endpoint_is_valid_uri(endpoints::USER_CURRENCY);
    }

    #[test]
    fn format_endpoint_replaces_parameter() {
        let got = format_endpoint(endpoints::TRANSACTION, 42);

        assert_eq!(got, "/transactions/42");
    }

    #[test]
    fn format_endpoint_returns_path_without_parameter_unchanged() {
        let got = format_endpoint(endpoints::TRANSACTIONS, 42);

        assert_eq!(got, endpoints::TRANSACTIONS);
    }

    #[test]
    fn format_endpoint_replaces_one_parameter_per_call() {
        let got = format_endpoint(&format_endpoint(endpoints::SUMMARY_BY_MONTH, 2024), 3);

        assert_eq!(got, "/transactions/summary/2024/3");
    }
}
