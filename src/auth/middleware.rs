//! Authentication middleware that validates bearer tokens and attaches the
//! authenticated user to the request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{AppState, Error, auth::token::validate_token, stores::UserStore};

/// Middleware function that checks for a valid `Authorization: Bearer` header.
/// The authenticated user is placed into the request and the request executed
/// normally if the token is valid, otherwise a 401 response is returned.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user): Extension<User>` to receive the authenticated user.
pub async fn auth_guard(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return Error::Unauthenticated.into_response();
    };

    let username = match validate_token(bearer.token(), &state.token_keys) {
        Ok(username) => username,
        Err(_) => return Error::Unauthenticated.into_response(),
    };

    // A token can outlive its user if the account is removed from the
    // database directly, so the lookup failure is still an auth failure.
    let user = match state.user_store.get_by_username(username.as_ref()) {
        Ok(user) => user,
        Err(_) => return Error::Unauthenticated.into_response(),
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}
