//! The endpoint for fetching a single transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    models::{DatabaseID, User},
    stores::CategoryStore,
    transaction::{core::get_transaction, models::TransactionResponse},
};

/// Handle the GET request for one of the authenticated user's transactions.
///
/// # Errors
///
/// This function will return a:
/// - [Error::TransactionNotFound] if `transaction_id` does not refer to a
///   valid transaction,
/// - [Error::TransactionAccessDenied] if the transaction belongs to another
///   user.
pub async fn get_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<Json<TransactionResponse>, Error> {
    let transaction = get_transaction(&state.transaction_store, user.id(), transaction_id)?;
    let category = state.category_store.get(transaction.category_id())?;

    Ok(Json(TransactionResponse::new(&transaction, &category)))
}

#[cfg(test)]
mod get_transaction_endpoint_tests {
    use std::str::FromStr;

    use axum::{Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use email_address::EmailAddress;
    use rust_decimal::Decimal;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState, endpoints,
        auth::{auth_guard, issue_token},
        models::{
            Amount, CategoryName, CategoryOwnership, NewCategory, NewTransaction, NewUser,
            PasswordHash, Transaction, TransactionType, User, Username,
        },
        stores::{CategoryStore, TransactionStore, UserStore},
        transaction::models::TransactionResponse,
    };

    use super::get_transaction_endpoint;

    fn get_server() -> (AppState, TestServer) {
        let connection = Connection::open_in_memory().expect("Could not open database.");
        let state = AppState::new(connection, "wuzzlewazzle").expect("Could not create app state.");

        let app = Router::new()
            .route(endpoints::TRANSACTION, get(get_transaction_endpoint))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());

        (
            state,
            TestServer::try_new(app).expect("Could not create test server."),
        )
    }

    fn create_user(state: &AppState, username: &str) -> (User, String) {
        let user = state
            .user_store
            .create(NewUser {
                username: Username::new_unchecked(username),
                email: EmailAddress::from_str(&format!("{username}@example.com")).unwrap(),
                password_hash: PasswordHash::new_unchecked("hash"),
                full_name: "Test User".to_string(),
            })
            .expect("Could not create test user.");
        let token = issue_token(user.username(), &state.token_keys, state.token_duration).unwrap();

        (user, token)
    }

    fn create_transaction(state: &AppState, user: &User) -> Transaction {
        let category = state
            .category_store
            .create(NewCategory {
                name: CategoryName::new_unchecked("Coffee"),
                description: None,
                color: "#4ECDC4".to_string(),
                category_type: TransactionType::Expense,
                ownership: CategoryOwnership::Owned(user.id()),
            })
            .unwrap();

        state
            .transaction_store
            .create(NewTransaction {
                amount: Amount::new(Decimal::from_str("12.50").unwrap()).unwrap(),
                description: "coffee".to_string(),
                date: date!(2024 - 03 - 05),
                transaction_type: TransactionType::Expense,
                category_id: category.id(),
                user_id: user.id(),
                notes: None,
            })
            .unwrap()
    }

    #[tokio::test]
    async fn get_returns_own_transaction() {
        let (state, server) = get_server();
        let (user, token) = create_user(&state, "alice");
        let transaction = create_transaction(&state, &user);

        let response = server
            .get(&endpoints::format_endpoint(
                endpoints::TRANSACTION,
                transaction.id(),
            ))
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        let body = response.json::<TransactionResponse>();
        assert_eq!(body.id, transaction.id());
        assert_eq!(body.category_name, "Coffee");
    }

    #[tokio::test]
    async fn get_other_users_transaction_returns_forbidden() {
        let (state, server) = get_server();
        let (alice, _) = create_user(&state, "alice");
        let (_, bob_token) = create_user(&state, "bob");
        let transaction = create_transaction(&state, &alice);

        let response = server
            .get(&endpoints::format_endpoint(
                endpoints::TRANSACTION,
                transaction.id(),
            ))
            .authorization_bearer(bob_token)
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn get_missing_transaction_returns_not_found() {
        let (state, server) = get_server();
        let (_, token) = create_user(&state, "alice");

        let response = server
            .get(&endpoints::format_endpoint(endpoints::TRANSACTION, 999))
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
