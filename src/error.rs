//! Defines the app level error type and its mapping to structured JSON error responses.

use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{
        HeaderValue, StatusCode,
        header::{CONTENT_LENGTH, CONTENT_TYPE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::models::DatabaseID;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid combination of username and password.
    ///
    /// The same error is returned whether the username is unknown or the
    /// password is wrong, so that callers cannot enumerate registered users.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The bearer token was malformed, expired, or had an invalid signature.
    ///
    /// The individual failure modes are deliberately collapsed into one error
    /// so the client cannot tell which check failed.
    #[error("Invalid token")]
    InvalidToken,

    /// A protected endpoint was called without valid authentication.
    #[error("Full authentication is required to access this resource")]
    Unauthenticated,

    /// The username used at registration is already taken.
    #[error("Username is already taken!")]
    DuplicateUsername,

    /// The email address used at registration is already in use.
    #[error("Email is already in use!")]
    DuplicateEmail,

    /// One or more request fields failed validation.
    ///
    /// Each entry is a `field: message` pair that is echoed back to the
    /// client in the `details` list of the error body.
    #[error("Invalid input parameters")]
    Validation(Vec<String>),

    /// The category ID does not refer to a category in the database.
    #[error("Category not found with id: {0}")]
    CategoryNotFound(DatabaseID),

    /// The transaction ID does not refer to a transaction in the database.
    #[error("Transaction not found with id: {0}")]
    TransactionNotFound(DatabaseID),

    /// The caller tried to use a category that is neither a default category
    /// nor one of their own.
    #[error("You do not have access to this category")]
    CategoryAccessDenied,

    /// The caller tried to modify or delete a category that is a default
    /// category or belongs to another user.
    #[error("You do not have permission to modify this category")]
    CategoryModificationDenied,

    /// The caller tried to read, modify or delete another user's transaction.
    #[error("You do not have access to this transaction")]
    TransactionAccessDenied,

    /// The category cannot be deleted because transactions still reference it.
    #[error("Category is still in use by existing transactions")]
    CategoryInUse,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows. Stores
    /// map it to the resource-specific variants where the resource is known.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// Clients receive a generic internal server error instead.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The token signing library failed to produce a token.
    #[error("could not sign token: {0}")]
    TokenCreation(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl Error {
    /// Shorthand for a single-field validation failure.
    pub fn validation(field: &str, message: &str) -> Self {
        Error::Validation(vec![format!("{field}: {message}")])
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.username") =>
            {
                Error::DuplicateUsername
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The structured body returned for every error response.
///
/// `path` is filled in by [attach_error_path] since the request URI is not
/// available where the error is converted into a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// The HTTP status code, duplicated in the body for client convenience.
    pub status: u16,
    /// The short reason phrase for the status, e.g. "Not Found".
    pub error: String,
    /// A human readable description of what went wrong.
    pub message: String,
    /// The path of the request that failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Field level detail messages for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            Error::InvalidCredentials | Error::InvalidToken => (StatusCode::BAD_REQUEST, None),
            Error::Validation(details) => (StatusCode::BAD_REQUEST, Some(details.clone())),
            Error::Unauthenticated => (StatusCode::UNAUTHORIZED, None),
            Error::CategoryAccessDenied
            | Error::CategoryModificationDenied
            | Error::TransactionAccessDenied => (StatusCode::FORBIDDEN, None),
            Error::CategoryNotFound(_)
            | Error::TransactionNotFound(_)
            | Error::NotFound => (StatusCode::NOT_FOUND, None),
            Error::DuplicateUsername | Error::DuplicateEmail | Error::CategoryInUse => {
                (StatusCode::CONFLICT, None)
            }
            Error::HashingError(_) | Error::TokenCreation(_) | Error::SqlError(_) => {
                tracing::error!("An unexpected error occurred: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, None)
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal details are logged above, never echoed to the client.
            "An unexpected error occurred".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorBody {
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message,
            path: None,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Middleware that ensures every error response carries a structured body.
///
/// Error responses produced by [Error::into_response] do not have access to
/// the request URI, so this middleware fills in their `path` field. Error
/// responses with a plain text body, such as extractor rejections for
/// malformed JSON, are wrapped into an [ErrorBody] with the original text as
/// the message.
pub async fn attach_error_path(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not buffer error response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    let error_body = match serde_json::from_slice::<ErrorBody>(&body_bytes) {
        Ok(error_body) if error_body.path.is_some() => {
            return Response::from_parts(parts, Body::from(body_bytes));
        }
        Ok(mut error_body) => {
            error_body.path = Some(path);
            error_body
        }
        // Extractor rejections produce plain text bodies. Wrap the text into
        // the structured error body instead of leaking it as-is.
        Err(_) => {
            let reason = status.canonical_reason().unwrap_or("Unknown Error");
            let text = String::from_utf8_lossy(&body_bytes);
            let message = if text.trim().is_empty() {
                reason.to_string()
            } else {
                text.into_owned()
            };

            ErrorBody {
                status: status.as_u16(),
                error: reason.to_string(),
                message,
                path: Some(path),
                details: None,
            }
        }
    };

    match serde_json::to_vec(&error_body) {
        Ok(new_body) => {
            // The body length changed, let hyper recompute the header.
            parts.headers.remove(CONTENT_LENGTH);
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            Response::from_parts(parts, Body::from(new_body))
        }
        Err(_) => Response::from_parts(parts, Body::from(body_bytes)),
    }
}
