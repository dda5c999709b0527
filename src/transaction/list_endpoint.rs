//! The endpoints for listing transactions.

use std::str::FromStr;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    models::{TransactionType, User},
    pagination::PageParams,
    stores::{TransactionQuery, TransactionStore},
    transaction::{
        core::{build_responses, month_range},
        models::TransactionResponse,
    },
};

/// The required query parameters of the date range listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    /// The first date to include.
    pub start_date: Date,
    /// The last date to include.
    pub end_date: Date,
}

/// Handle the GET request for the authenticated user's transactions, newest
/// first, optionally paged with the zero-based `page` and `size` query
/// parameters.
pub async fn get_transactions(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(page_params): Query<PageParams>,
) -> Result<Json<Vec<TransactionResponse>>, Error> {
    let transactions = state.transaction_store.get_query(
        user.id(),
        TransactionQuery {
            offset_limit: page_params.to_offset_limit()?,
            ..TransactionQuery::default()
        },
    )?;

    Ok(Json(build_responses(
        &state.category_store,
        user.id(),
        &transactions,
    )?))
}

/// Handle the GET request for the transactions dated within an inclusive
/// range, given by the `startDate` and `endDate` query parameters.
///
/// # Errors
///
/// This function will return an [Error::Validation] if the start date is
/// after the end date.
pub async fn get_transactions_by_date_range(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<DateRangeParams>,
) -> Result<Json<Vec<TransactionResponse>>, Error> {
    if params.start_date > params.end_date {
        return Err(Error::validation(
            "startDate",
            "Start date must not be after end date",
        ));
    }

    let transactions = state.transaction_store.get_query(
        user.id(),
        TransactionQuery {
            date_range: Some(params.start_date..=params.end_date),
            ..TransactionQuery::default()
        },
    )?;

    Ok(Json(build_responses(
        &state.category_store,
        user.id(),
        &transactions,
    )?))
}

/// Handle the GET request for the transactions of a single type.
///
/// # Errors
///
/// This function will return an [Error::Validation] if the path segment is
/// neither `INCOME` nor `EXPENSE`.
pub async fn get_transactions_by_type(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(transaction_type): Path<String>,
) -> Result<Json<Vec<TransactionResponse>>, Error> {
    let transaction_type = TransactionType::from_str(&transaction_type)
        .map_err(|_| Error::validation("type", "Type must be either INCOME or EXPENSE"))?;

    let transactions = state.transaction_store.get_query(
        user.id(),
        TransactionQuery {
            transaction_type: Some(transaction_type),
            ..TransactionQuery::default()
        },
    )?;

    Ok(Json(build_responses(
        &state.category_store,
        user.id(),
        &transactions,
    )?))
}

/// Handle the GET request for the transactions of one calendar month.
///
/// # Errors
///
/// This function will return an [Error::Validation] if the month is not
/// between 1 and 12.
pub async fn get_transactions_by_month(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Json<Vec<TransactionResponse>>, Error> {
    let transactions = state.transaction_store.get_query(
        user.id(),
        TransactionQuery {
            date_range: Some(month_range(year, month)?),
            ..TransactionQuery::default()
        },
    )?;

    Ok(Json(build_responses(
        &state.category_store,
        user.id(),
        &transactions,
    )?))
}

#[cfg(test)]
mod list_transactions_tests {
    use std::str::FromStr;

    use axum::{Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use email_address::EmailAddress;
    use rust_decimal::Decimal;
    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        AppState, endpoints,
        auth::{auth_guard, issue_token},
        models::{
            Amount, CategoryName, CategoryOwnership, DatabaseID, NewCategory, NewTransaction,
            NewUser, PasswordHash, TransactionType, User, Username,
        },
        stores::{CategoryStore, TransactionStore, UserStore},
        transaction::models::TransactionResponse,
    };

    use super::{
        get_transactions, get_transactions_by_date_range, get_transactions_by_month,
        get_transactions_by_type,
    };

    struct Fixture {
        state: AppState,
        server: TestServer,
        token: String,
        user: User,
        category_id: DatabaseID,
    }

    fn get_fixture() -> Fixture {
        let connection = Connection::open_in_memory().expect("Could not open database.");
        let state = AppState::new(connection, "wuzzlewazzle").expect("Could not create app state.");

        let user = state
            .user_store
            .create(NewUser {
                username: Username::new_unchecked("alice"),
                email: EmailAddress::from_str("alice@example.com").unwrap(),
                password_hash: PasswordHash::new_unchecked("hash"),
                full_name: "Alice Doe".to_string(),
            })
            .expect("Could not create test user.");
        let token = issue_token(user.username(), &state.token_keys, state.token_duration).unwrap();
        let category_id = state
            .category_store
            .create(NewCategory {
                name: CategoryName::new_unchecked("Coffee"),
                description: None,
                color: "#4ECDC4".to_string(),
                category_type: TransactionType::Expense,
                ownership: CategoryOwnership::Owned(user.id()),
            })
            .unwrap()
            .id();

        let app = Router::new()
            .route(endpoints::TRANSACTIONS, get(get_transactions))
            .route(
                endpoints::TRANSACTIONS_BY_DATE_RANGE,
                get(get_transactions_by_date_range),
            )
            .route(
                endpoints::TRANSACTIONS_BY_TYPE,
                get(get_transactions_by_type),
            )
            .route(
                endpoints::TRANSACTIONS_BY_MONTH,
                get(get_transactions_by_month),
            )
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());

        Fixture {
            state,
            server: TestServer::try_new(app).expect("Could not create test server."),
            token,
            user,
            category_id,
        }
    }

    impl Fixture {
        fn create_transaction(&self, date: Date, transaction_type: TransactionType) {
            self.state
                .transaction_store
                .create(NewTransaction {
                    amount: Amount::new(Decimal::from_str("12.50").unwrap()).unwrap(),
                    description: "test".to_string(),
                    date,
                    transaction_type,
                    category_id: self.category_id,
                    user_id: self.user.id(),
                    notes: None,
                })
                .unwrap();
        }
    }

    #[tokio::test]
    async fn listing_returns_transactions_newest_first() {
        let fixture = get_fixture();
        fixture.create_transaction(date!(2024 - 03 - 01), TransactionType::Expense);
        fixture.create_transaction(date!(2024 - 03 - 09), TransactionType::Expense);
        fixture.create_transaction(date!(2024 - 03 - 05), TransactionType::Expense);

        let response = fixture
            .server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&fixture.token)
            .await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<TransactionResponse>>();
        let dates: Vec<Date> = transactions
            .iter()
            .map(|transaction| transaction.transaction_date)
            .collect();
        assert_eq!(
            dates,
            vec![
                date!(2024 - 03 - 09),
                date!(2024 - 03 - 05),
                date!(2024 - 03 - 01)
            ]
        );
    }

    #[tokio::test]
    async fn listing_with_page_and_size_returns_one_page() {
        let fixture = get_fixture();
        for day in 1u8..=5 {
            fixture.create_transaction(
                date!(2024 - 03 - 01).replace_day(day).unwrap(),
                TransactionType::Expense,
            );
        }

        let response = fixture
            .server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("page", 1)
            .add_query_param("size", 2)
            .authorization_bearer(&fixture.token)
            .await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<TransactionResponse>>();
        let dates: Vec<Date> = transactions
            .iter()
            .map(|transaction| transaction.transaction_date)
            .collect();
        assert_eq!(dates, vec![date!(2024 - 03 - 03), date!(2024 - 03 - 02)]);
    }

    #[tokio::test]
    async fn listing_with_only_page_returns_bad_request() {
        let fixture = get_fixture();

        let response = fixture
            .server
            .get(endpoints::TRANSACTIONS)
            .add_query_param("page", 1)
            .authorization_bearer(&fixture.token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn listing_by_date_range_is_inclusive() {
        let fixture = get_fixture();
        fixture.create_transaction(date!(2024 - 03 - 01), TransactionType::Expense);
        fixture.create_transaction(date!(2024 - 03 - 05), TransactionType::Expense);
        fixture.create_transaction(date!(2024 - 03 - 09), TransactionType::Expense);

        let response = fixture
            .server
            .get(endpoints::TRANSACTIONS_BY_DATE_RANGE)
            .add_query_param("startDate", "2024-03-01")
            .add_query_param("endDate", "2024-03-05")
            .authorization_bearer(&fixture.token)
            .await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<TransactionResponse>>();
        assert_eq!(transactions.len(), 2);
    }

    #[tokio::test]
    async fn listing_by_inverted_date_range_returns_bad_request() {
        let fixture = get_fixture();

        let response = fixture
            .server
            .get(endpoints::TRANSACTIONS_BY_DATE_RANGE)
            .add_query_param("startDate", "2024-03-09")
            .add_query_param("endDate", "2024-03-01")
            .authorization_bearer(&fixture.token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn listing_by_type_returns_only_matching_transactions() {
        let fixture = get_fixture();
        fixture.create_transaction(date!(2024 - 03 - 01), TransactionType::Income);
        fixture.create_transaction(date!(2024 - 03 - 05), TransactionType::Expense);

        let response = fixture
            .server
            .get(&endpoints::format_endpoint(
                endpoints::TRANSACTIONS_BY_TYPE,
                "INCOME",
            ))
            .authorization_bearer(&fixture.token)
            .await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<TransactionResponse>>();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].transaction_type, TransactionType::Income);
    }

    #[tokio::test]
    async fn listing_by_month_excludes_other_months() {
        let fixture = get_fixture();
        fixture.create_transaction(date!(2024 - 02 - 29), TransactionType::Expense);
        fixture.create_transaction(date!(2024 - 03 - 01), TransactionType::Expense);
        fixture.create_transaction(date!(2024 - 03 - 31), TransactionType::Expense);
        fixture.create_transaction(date!(2024 - 04 - 01), TransactionType::Expense);

        let response = fixture
            .server
            .get(&endpoints::format_endpoint(
                &endpoints::format_endpoint(endpoints::TRANSACTIONS_BY_MONTH, 2024),
                3,
            ))
            .authorization_bearer(&fixture.token)
            .await;

        response.assert_status_ok();
        let transactions = response.json::<Vec<TransactionResponse>>();
        assert_eq!(transactions.len(), 2);
    }

    #[tokio::test]
    async fn listing_by_month_thirteen_returns_bad_request() {
        let fixture = get_fixture();

        let response = fixture
            .server
            .get(&endpoints::format_endpoint(
                &endpoints::format_endpoint(endpoints::TRANSACTIONS_BY_MONTH, 2024),
                13,
            ))
            .authorization_bearer(&fixture.token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
