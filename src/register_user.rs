//! The endpoint for registering a new user account.

use std::str::FromStr;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    models::{NewUser, PasswordHash, Username, ValidatedPassword},
    stores::UserStore,
};

/// The minimum number of characters a full name must have.
const FULL_NAME_MIN_LENGTH: usize = 1;
/// The maximum number of characters a full name may have.
const FULL_NAME_MAX_LENGTH: usize = 100;

/// The data for registering a new user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// The name the user will log in with.
    pub username: String,
    /// The user's email address.
    pub email: String,
    /// The user's plain text password.
    pub password: String,
    /// The user's display name.
    pub full_name: String,
}

impl RegisterRequest {
    /// Validate every field and collect the failures, so the client gets all
    /// of them in one response instead of one per request.
    fn validate(&self) -> Result<(Username, EmailAddress, ValidatedPassword, String), Error> {
        let mut details = Vec::new();

        let username = Username::new(&self.username);
        if let Err(Error::Validation(username_details)) = &username {
            details.extend(username_details.iter().cloned());
        }

        let email = EmailAddress::from_str(&self.email);
        if email.is_err() {
            details.push("email: Invalid email format".to_string());
        }

        let password = ValidatedPassword::new(&self.password);
        if let Err(Error::Validation(password_details)) = &password {
            details.extend(password_details.iter().cloned());
        }

        let full_name_length = self.full_name.chars().count();
        if !(FULL_NAME_MIN_LENGTH..=FULL_NAME_MAX_LENGTH).contains(&full_name_length) {
            details.push("fullName: Full name must be between 1 and 100 characters".to_string());
        }

        match (username, email, password) {
            (Ok(username), Ok(email), Ok(password)) if details.is_empty() => {
                Ok((username, email, password, self.full_name.clone()))
            }
            _ => Err(Error::Validation(details)),
        }
    }
}

/// Handle the POST request for registering a new user.
///
/// # Errors
///
/// This function will return a:
/// - [Error::Validation] if any request field fails validation,
/// - [Error::DuplicateUsername] if the username is already taken,
/// - [Error::DuplicateEmail] if the email is already in use.
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Response, Error> {
    tracing::info!("Registration attempt for username: {}", request.username);

    let (username, email, password, full_name) = request.validate()?;
    let password_hash = PasswordHash::new(password, PasswordHash::DEFAULT_COST)?;

    let user = state.user_store.create(NewUser {
        username,
        email,
        password_hash,
        full_name,
    })?;

    tracing::info!("User registered successfully: {}", user.username());

    Ok("User registered successfully!".into_response())
}
