//! The endpoint for creating a category.

use axum::{Extension, Json, extract::State};

use crate::{
    AppState, Error,
    category::{
        core::create_category,
        models::{CategoryRequest, CategoryResponse},
    },
    models::User,
};

/// Handle the POST request for creating a category owned by the
/// authenticated user.
///
/// # Errors
///
/// This function will return an [Error::Validation] listing every invalid
/// field in the request body.
pub async fn create_category_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<CategoryResponse>, Error> {
    let (name, description, color) = request.validate()?;

    let category = create_category(
        &state.category_store,
        user.id(),
        name,
        description,
        color,
        request.category_type,
    )?;

    tracing::info!("user {} created category {}", user.username(), category.id());

    Ok(Json(CategoryResponse::from(&category)))
}
