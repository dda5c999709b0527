//! The endpoint for checking whether an auth token is still valid.

use axum::{Json, extract::State};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{AppState, Error, auth::validate_token, log_in::TokenResponse, stores::UserStore};

/// Handle the GET request for validating an auth token.
///
/// Echoes the token along with the user's details when the token is valid.
///
/// # Errors
///
/// This function will return an [Error::InvalidToken] if the header is
/// missing, the token fails validation, or the token's user no longer exists.
pub async fn validate_token_endpoint(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
) -> Result<Json<TokenResponse>, Error> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        tracing::warn!("Invalid token validation attempt");
        return Err(Error::InvalidToken);
    };

    let username = validate_token(bearer.token(), &state.token_keys)?;

    let user = state
        .user_store
        .get_by_username(username.as_ref())
        .map_err(|_| Error::InvalidToken)?;

    tracing::debug!("Token validated successfully for user: {username}");

    Ok(Json(TokenResponse::new(bearer.token().to_string(), &user)))
}

#[cfg(test)]
mod validate_token_tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use std::str::FromStr;

    use email_address::EmailAddress;
    use time::Duration;

    use crate::{
        AppState, endpoints,
        auth::issue_token,
        error::ErrorBody,
        models::{NewUser, PasswordHash, User, Username},
        stores::UserStore,
        validate_token::validate_token_endpoint,
    };

    fn get_state_and_server() -> (AppState, TestServer) {
        let connection = Connection::open_in_memory().expect("Could not open database.");
        let state = AppState::new(connection, "wuzzlewazzle").expect("Could not create app state.");

        let app = Router::new()
            .route(endpoints::VALIDATE_TOKEN, get(validate_token_endpoint))
            .with_state(state.clone());

        (state, TestServer::try_new(app).expect("Could not create test server."))
    }

    fn create_test_user(state: &AppState) -> User {
        state
            .user_store
            .create(NewUser {
                username: Username::new_unchecked("alice"),
                email: EmailAddress::from_str("alice@example.com").unwrap(),
                password_hash: PasswordHash::new_unchecked("hash"),
                full_name: "Alice Doe".to_string(),
            })
            .expect("Could not create test user.")
    }

    #[tokio::test]
    async fn validate_fails_without_header() {
        let (_, server) = get_state_and_server();

        let response = server.get(endpoints::VALIDATE_TOKEN).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorBody = response.json();
        assert_eq!(body.message, "Invalid token");
    }

    #[tokio::test]
    async fn validate_fails_on_expired_token() {
        let (state, server) = get_state_and_server();
        let user = create_test_user(&state);
        let token = issue_token(user.username(), &state.token_keys, Duration::minutes(-5)).unwrap();

        let response = server
            .get(endpoints::VALIDATE_TOKEN)
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorBody = response.json();
        assert_eq!(body.message, "Invalid token");
    }

    #[tokio::test]
    async fn validate_fails_when_user_no_longer_exists() {
        let (state, server) = get_state_and_server();
        let token = issue_token(
            &Username::new_unchecked("ghost"),
            &state.token_keys,
            state.token_duration,
        )
        .unwrap();

        let response = server
            .get(endpoints::VALIDATE_TOKEN)
            .authorization_bearer(token)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
