//! The endpoint for deleting a category.

use axum::{
    Extension,
    extract::{Path, State},
    response::{IntoResponse, Response},
};

use crate::{
    AppState, Error,
    category::core::delete_category,
    models::{DatabaseID, User},
};

/// Handle the DELETE request for removing one of the authenticated user's
/// categories.
///
/// # Errors
///
/// This function will return a:
/// - [Error::CategoryNotFound] if `category_id` does not refer to a valid category,
/// - [Error::CategoryModificationDenied] if the category is a default
///   category or belongs to another user,
/// - [Error::CategoryInUse] if any transaction still references the category.
pub async fn delete_category_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(category_id): Path<DatabaseID>,
) -> Result<Response, Error> {
    delete_category(
        &state.category_store,
        &state.transaction_store,
        user.id(),
        category_id,
    )?;

    tracing::info!("user {} deleted category {category_id}", user.username());

    Ok("Category deleted successfully".into_response())
}

#[cfg(test)]
mod delete_category_endpoint_tests {
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
            Amount, Category, CategoryName, CategoryOwnership, NewCategory, NewTransaction,
            NewUser, PasswordHash, TransactionType, User, Username,
        },
        stores::{CategoryStore, TransactionStore, UserStore},
    };

    use super::delete_category_endpoint;

    fn get_server_and_token() -> (AppState, TestServer, String, User) {
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

        let app = Router::new()
            .route(endpoints::CATEGORY, delete(delete_category_endpoint))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());

        (
            state,
            TestServer::try_new(app).expect("Could not create test server."),
            token,
            user,
        )
    }

    fn create_owned_category(state: &AppState, user: &User) -> Category {
        state
            .category_store
            .create(NewCategory {
                name: CategoryName::new_unchecked("Pets"),
                description: None,
                color: "#FF6B6B".to_string(),
                category_type: TransactionType::Expense,
                ownership: CategoryOwnership::Owned(user.id()),
            })
            .expect("Could not create test category.")
    }

    #[tokio::test]
    async fn delete_removes_the_category() {
        let (state, server, token, user) = get_server_and_token();
        let category = create_owned_category(&state, &user);

        let response = server
            .delete(&endpoints::format_endpoint(
                endpoints::CATEGORY,
                category.id(),
            ))
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        response.assert_text("Category deleted successfully");
        assert_eq!(
            state.category_store.get(category.id()),
            Err(Error::CategoryNotFound(category.id()))
        );
    }

    #[tokio::test]
    async fn delete_category_in_use_returns_conflict() {
        let (state, server, token, user) = get_server_and_token();
        let category = create_owned_category(&state, &user);
        state
            .transaction_store
            .create(NewTransaction {
                amount: Amount::new(Decimal::from_str("12.50").unwrap()).unwrap(),
                description: "vet appointment".to_string(),
                date: date!(2024 - 03 - 05),
                transaction_type: TransactionType::Expense,
                category_id: category.id(),
                user_id: user.id(),
                notes: None,
            })
            .unwrap();

        let response = server
            .delete(&endpoints::format_endpoint(
                endpoints::CATEGORY,
                category.id(),
            ))
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert!(state.category_store.get(category.id()).is_ok());
    }

    #[tokio::test]
    async fn delete_default_category_returns_forbidden() {
        let (state, server, token, user) = get_server_and_token();
        let default_category = state
            .category_store
            .get_visible(user.id())
            .unwrap()
            .into_iter()
            .find(|category| category.ownership().is_default())
            .expect("No default categories were seeded.");

        let response = server
            .delete(&endpoints::format_endpoint(
                endpoints::CATEGORY,
                default_category.id(),
            ))
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        assert!(state.category_store.get(default_category.id()).is_ok());
    }
}
