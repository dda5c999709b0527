//! The endpoints for monthly income and expense summaries.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    models::User,
    transaction::{core::monthly_summary, models::MonthlySummary},
};

/// Handle the GET request for the authenticated user's summary of the
/// current calendar month.
pub async fn get_current_summary(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<MonthlySummary>, Error> {
    let today = OffsetDateTime::now_utc().date();

    let summary = monthly_summary(
        &state.transaction_store,
        user.id(),
        today.year(),
        today.month() as u8,
    )?;

    Ok(Json(summary))
}

/// Handle the GET request for the summary of a specific calendar month.
///
/// # Errors
///
/// This function will return an [Error::Validation] if the month is not
/// between 1 and 12.
pub async fn get_summary_by_month(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Json<MonthlySummary>, Error> {
    let summary = monthly_summary(&state.transaction_store, user.id(), year, month)?;

    Ok(Json(summary))
}
