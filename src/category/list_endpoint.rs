//! The endpoints for listing the categories visible to a user.

use std::str::FromStr;

use axum::{Extension, Json, extract::Path, extract::State};

use crate::{
    AppState, Error,
    category::{
        core::{list_visible, list_visible_by_type},
        models::CategoryResponse,
    },
    models::{TransactionType, User},
};

/// Handle the GET request for the categories visible to the authenticated
/// user, that is, their own categories plus the defaults.
pub async fn get_categories(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<CategoryResponse>>, Error> {
    let categories = list_visible(&state.category_store, user.id())?;

    Ok(Json(categories.iter().map(CategoryResponse::from).collect()))
}

/// Handle the GET request for the visible categories of a single type.
///
/// # Errors
///
/// This function will return an [Error::Validation] if the path segment is
/// neither `INCOME` nor `EXPENSE`.
pub async fn get_categories_by_type(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(category_type): Path<String>,
) -> Result<Json<Vec<CategoryResponse>>, Error> {
    let category_type = TransactionType::from_str(&category_type)
        .map_err(|_| Error::validation("type", "Type must be either INCOME or EXPENSE"))?;

    let categories = list_visible_by_type(&state.category_store, user.id(), category_type)?;

    Ok(Json(categories.iter().map(CategoryResponse::from).collect()))
}

#[cfg(test)]
mod list_categories_tests {
    use std::str::FromStr;

    use axum::{Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use email_address::EmailAddress;
    use rusqlite::Connection;

    use crate::{
        AppState, endpoints,
        auth::{auth_guard, issue_token},
        category::models::CategoryResponse,
        db::{DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES},
        models::{
            CategoryName, CategoryOwnership, NewCategory, NewUser, PasswordHash, TransactionType,
            Username,
        },
        stores::{CategoryStore, UserStore},
    };

    use super::{get_categories, get_categories_by_type};

    fn get_server_and_token() -> (AppState, TestServer, String) {
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
            .route(endpoints::CATEGORIES, get(get_categories))
            .route(endpoints::CATEGORIES_BY_TYPE, get(get_categories_by_type))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());

        (
            state,
            TestServer::try_new(app).expect("Could not create test server."),
            token,
        )
    }

    #[tokio::test]
    async fn new_user_sees_the_default_categories() {
        let (_, server, token) = get_server_and_token();

        let response = server
            .get(endpoints::CATEGORIES)
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        let categories = response.json::<Vec<CategoryResponse>>();
        assert_eq!(
            categories.len(),
            DEFAULT_EXPENSE_CATEGORIES.len() + DEFAULT_INCOME_CATEGORIES.len()
        );
        assert!(categories.iter().all(|category| category.is_default));
    }

    #[tokio::test]
    async fn listing_includes_own_categories_sorted_by_name() {
        let (state, server, token) = get_server_and_token();
        state
            .category_store
            .create(NewCategory {
                name: CategoryName::new_unchecked("Aquarium"),
                description: None,
                color: "#FF6B6B".to_string(),
                category_type: TransactionType::Expense,
                ownership: CategoryOwnership::Owned(
                    state.user_store.get_by_username("alice").unwrap().id(),
                ),
            })
            .unwrap();

        let response = server
            .get(endpoints::CATEGORIES)
            .authorization_bearer(token)
            .await;

        let categories = response.json::<Vec<CategoryResponse>>();
        assert_eq!(categories[0].name, "Aquarium");
        assert!(!categories[0].is_default);
    }

    #[tokio::test]
    async fn listing_by_type_returns_only_matching_categories() {
        let (_, server, token) = get_server_and_token();

        let response = server
            .get(&endpoints::format_endpoint(
                endpoints::CATEGORIES_BY_TYPE,
                "INCOME",
            ))
            .authorization_bearer(token)
            .await;

        response.assert_status_ok();
        let categories = response.json::<Vec<CategoryResponse>>();
        assert_eq!(categories.len(), DEFAULT_INCOME_CATEGORIES.len());
        assert!(
            categories
                .iter()
                .all(|category| category.category_type == TransactionType::Income)
        );
    }

    #[tokio::test]
    async fn listing_by_unknown_type_returns_bad_request() {
        let (_, server, token) = get_server_and_token();

        let response = server
            .get(&endpoints::format_endpoint(
                endpoints::CATEGORIES_BY_TYPE,
                "SAVINGS",
            ))
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
