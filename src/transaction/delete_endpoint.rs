//! The endpoint for deleting a transaction.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    models::{DatabaseID, User},
    transaction::core::delete_transaction,
};

/// Handle the DELETE request for removing one of the authenticated user's
/// transactions.
///
/// # Errors
///
/// This function will return a:
/// - [Error::TransactionNotFound] if `transaction_id` does not refer to a
///   valid transaction,
/// - [Error::TransactionAccessDenied] if the transaction belongs to another
///   user.
pub async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<DatabaseID>,
) -> Result<Response, Error> {
    delete_transaction(&state.transaction_store, user.id(), transaction_id)?;

    tracing::info!(
        "user {} deleted transaction {transaction_id}",
        user.username()
    );

    Ok("Transaction deleted successfully".into_response())
}

#[cfg(test)]
mod delete_transaction_endpoint_tests {
    use std::str::FromStr;

    use axum::{Router, http::StatusCode, middleware, routing::delete};
    use axum_test::TestServer;
    use email_address::EmailAddress;
    use rust_decimal::Decimal;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        AppState, Error, endpoints,
        auth::{auth_guard, issue_token},
        models::{
            Amount, CategoryName, CategoryOwnership, NewCategory, NewTransaction, NewUser,
            PasswordHash, Transaction, TransactionType, User, Username,
        },
        stores::{CategoryStore, TransactionStore, UserStore},
    };

    use super::delete_transaction_endpoint;

    fn get_server() -> (AppState, TestServer) {
        let connection = Connection::open_in_memory().expect("Could not open database.");
        let state = AppState::new(connection, "wuzzlewazzle").expect("Could not create app state.");

        let app = Router::new()
            .route(endpoints::TRANSACTION, delete(delete_transaction_endpoint))
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
    async fn delete_removes_the_transaction() {
        let (state, server) = get_server();
        let (alice, token) = create_user(&state, "alice");
        let transaction = create_transaction(&state, &alice);

        let response = server
            .delete(&endpoints::format_endpoint(
                endpoints::TRANSACTION,
                transaction.id(),
            ))
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        response.assert_text("Transaction deleted successfully");
        assert_eq!(
            state.transaction_store.get(transaction.id()),
            Err(Error::TransactionNotFound(transaction.id()))
        );
    }

    #[tokio::test]
    async fn delete_other_users_transaction_returns_forbidden() {
        let (state, server) = get_server();
        let (alice, _) = create_user(&state, "alice");
        let (_, bob_token) = create_user(&state, "bob");
        let transaction = create_transaction(&state, &alice);

        let response = server
            .delete(&endpoints::format_endpoint(
                endpoints::TRANSACTION,
                transaction.id(),
            ))
            .authorization_bearer(bob_token)
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert!(state.transaction_store.get(transaction.id()).is_ok());
    }
}
