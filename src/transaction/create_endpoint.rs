//! The endpoint for recording a transaction.

use axum::{Extension, Json, extract::State};

use crate::{
    AppState, Error,
    models::User,
    stores::CategoryStore,
    transaction::{
        core::create_transaction,
        models::{TransactionRequest, TransactionResponse},
    },
};

/// Handle the POST request for recording a transaction for the authenticated
/// user.
///
/// # Errors
///
/// This function will return a:
/// - [Error::Validation] listing every invalid field in the request body,
/// - [Error::CategoryNotFound] if the referenced category does not exist,
/// - [Error::CategoryAccessDenied] if the referenced category belongs to
///   another user.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<TransactionResponse>, Error> {
    let (amount, description, notes) = request.validate()?;

    let transaction = create_transaction(
        &state.category_store,
        &state.transaction_store,
        user.id(),
        amount,
        description,
        request.transaction_date,
        request.transaction_type,
        request.category_id,
        notes,
    )?;

    tracing::info!(
        "user {} recorded transaction {}",
        user.username(),
        transaction.id()
    );

    let category = state.category_store.get(transaction.category_id())?;

    Ok(Json(TransactionResponse::new(&transaction, &category)))
}
