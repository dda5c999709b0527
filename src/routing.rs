//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router,
    http::{StatusCode, Uri},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};

use crate::{
    AppState,
    auth::auth_guard,
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories,
        get_categories_by_type, update_category_endpoint,
    },
    endpoints,
    error::{ErrorBody, attach_error_path},
    log_in::log_in,
    register_user::register_user,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_current_summary,
        get_summary_by_month, get_transaction_endpoint, get_transactions,
        get_transactions_by_date_range, get_transactions_by_month, get_transactions_by_type,
        update_transaction_endpoint,
    },
    user::update_currency,
    validate_token::validate_token_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(log_in))
        .route(endpoints::VALIDATE_TOKEN, get(validate_token_endpoint));

    let protected_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(get_categories).post(create_category_endpoint),
        )
        .route(endpoints::CATEGORIES_BY_TYPE, get(get_categories_by_type))
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS_BY_DATE_RANGE,
            get(get_transactions_by_date_range),
        )
        .route(
            endpoints::TRANSACTIONS_BY_TYPE,
            get(get_transactions_by_type),
        )
        .route(
            endpoints::TRANSACTIONS_BY_MONTH,
            get(get_transactions_by_month),
        )
        .route(endpoints::SUMMARY, get(get_current_summary))
        .route(endpoints::SUMMARY_BY_MONTH, get(get_summary_by_month))
        .route(endpoints::USER_CURRENCY, put(update_currency))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_not_found)
        .layer(middleware::from_fn(attach_error_path))
        .with_state(state)
}

/// Requests for unknown routes get the same JSON error body as every other
/// failure.
async fn get_not_found(uri: Uri) -> Response {
    let body = ErrorBody {
        status: StatusCode::NOT_FOUND.as_u16(),
        error: "Not Found".to_string(),
        message: format!("No route for {}", uri.path()),
        path: Some(uri.path().to_string()),
        details: None,
    };

    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
