//! The endpoint for updating a transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    models::{DatabaseID, User},
    stores::CategoryStore,
    transaction::{
        core::update_transaction,
        models::{TransactionRequest, TransactionResponse},
    },
};

/// Handle the PUT request for overwriting one of the authenticated user's
/// transactions.
///
/// # Errors
///
/// This function will return a:
/// - [Error::Validation] listing every invalid field in the request body,
/// - [Error::TransactionNotFound] if `transaction_id` does not refer to a
///   valid transaction,
/// - [Error::TransactionAccessDenied] if the transaction belongs to another
///   user,
/// - [Error::CategoryNotFound] or [Error::CategoryAccessDenied] if the
///   transaction is moved to a category the caller cannot use.
pub async fn update_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(transaction_id): Path<DatabaseID>,
    Json(request): Json<TransactionRequest>,
) -> Result<Json<TransactionResponse>, Error> {
    let (amount, description, notes) = request.validate()?;

    let transaction = update_transaction(
        &state.category_store,
        &state.transaction_store,
        user.id(),
        transaction_id,
        amount,
        description,
        request.transaction_date,
        request.transaction_type,
        request.category_id,
        notes,
    )?;

    let category = state.category_store.get(transaction.category_id())?;

    Ok(Json(TransactionResponse::new(&transaction, &category)))
}
