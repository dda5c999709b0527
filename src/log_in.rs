//! The endpoint for logging in a user and issuing an auth token.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::issue_token,
    models::User,
    stores::UserStore,
};

/// The credentials for logging in a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The name the user registered with.
    pub username: String,
    /// The user's plain text password.
    pub password: String,
}

/// The response to a successful log in or token validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// The signed auth token.
    pub token: String,
    /// The token scheme, always `Bearer`.
    #[serde(rename = "type")]
    pub token_type: String,
    /// The name the user logs in with.
    pub username: String,
    /// The user's email address.
    pub email: String,
    /// The user's display name.
    pub full_name: String,
    /// The user's preferred currency code.
    pub currency: String,
}

impl TokenResponse {
    /// Build the response for `user` holding `token`.
    pub fn new(token: String, user: &User) -> Self {
        Self {
            token,
            token_type: "Bearer".to_string(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            full_name: user.full_name().to_string(),
            currency: user.currency().to_string(),
        }
    }
}

/// Handle the POST request for logging in a user.
///
/// # Errors
///
/// This function will return an [Error::InvalidCredentials] if the username is
/// unknown or the password does not match. The two cases are indistinguishable
/// to the client.
pub async fn log_in(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, Error> {
    tracing::info!("Login attempt for username: {}", request.username);

    let user = state
        .user_store
        .get_by_username(&request.username)
        .map_err(|_| Error::InvalidCredentials)?;

    let password_matches = user
        .password_hash()
        .verify(&request.password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !password_matches {
        return Err(Error::InvalidCredentials);
    }

    let token = issue_token(user.username(), &state.token_keys, state.token_duration)?;

    tracing::info!("Authentication successful for user: {}", user.username());

    Ok(Json(TokenResponse::new(token, &user)))
}
