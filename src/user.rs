//! The endpoint for updating the authenticated user's preferences.

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, models::User, stores::UserStore};

/// The longest accepted currency code. Covers ISO 4217 codes with room for
/// informal codes like "USDT".
const CURRENCY_MAX_LENGTH: usize = 8;

/// The data for changing the preferred currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCurrencyRequest {
    /// The new currency code, e.g. "EUR".
    pub currency: String,
}

/// Handle the PUT request for changing the authenticated user's preferred
/// currency.
///
/// # Errors
///
/// This function will return an [Error::Validation] if the currency is empty
/// or longer than 8 characters.
pub async fn update_currency(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateCurrencyRequest>,
) -> Result<Response, Error> {
    if request.currency.is_empty() {
        return Err(Error::validation("currency", "Currency is required"));
    }

    if request.currency.chars().count() > CURRENCY_MAX_LENGTH {
        return Err(Error::validation(
            "currency",
            "Currency must be at most 8 characters",
        ));
    }

    state
        .user_store
        .update_currency(user.id(), &request.currency)?;

    Ok("Currency updated successfully".into_response())
}

#[cfg(test)]
mod update_currency_tests {
    use axum::{Router, http::StatusCode, middleware, routing::put};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use std::str::FromStr;

    use email_address::EmailAddress;

    use crate::{
        AppState, endpoints,
        auth::{auth_guard, issue_token},
        models::{NewUser, PasswordHash, Username},
        stores::UserStore,
        user::{UpdateCurrencyRequest, update_currency},
    };

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
            .route(endpoints::USER_CURRENCY, put(update_currency))
            .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard))
            .with_state(state.clone());

        (
            state,
            TestServer::try_new(app).expect("Could not create test server."),
            token,
        )
    }

    #[tokio::test]
    async fn update_currency_persists_new_currency() {
        let (state, server, token) = get_server_and_token();

        let response = server
            .put(endpoints::USER_CURRENCY)
            .authorization_bearer(token)
            .json(&UpdateCurrencyRequest {
                currency: "EUR".to_string(),
            })
            .await;

        response.assert_status_ok();
        response.assert_text("Currency updated successfully");
        let user = state.user_store.get_by_username("alice").unwrap();
        assert_eq!(user.currency(), "EUR");
    }

    #[tokio::test]
    async fn update_currency_rejects_empty_currency() {
        let (_, server, token) = get_server_and_token();

        let response = server
            .put(endpoints::USER_CURRENCY)
            .authorization_bearer(token)
            .json(&UpdateCurrencyRequest {
                currency: "".to_string(),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_currency_requires_authentication() {
        let (_, server, _) = get_server_and_token();

        let response = server
            .put(endpoints::USER_CURRENCY)
            .json(&UpdateCurrencyRequest {
                currency: "EUR".to_string(),
            })
            .await;

        response.assert_status_unauthorized();
    }
}
