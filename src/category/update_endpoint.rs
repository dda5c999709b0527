//! The endpoint for updating a category.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    category::{
        core::update_category,
        models::{CategoryRequest, CategoryResponse},
    },
    models::{DatabaseID, User},
    stores::CategoryUpdate,
};

/// Handle the PUT request for overwriting one of the authenticated user's
/// categories.
///
/// # Errors
///
/// This function will return a:
/// - [Error::Validation] listing every invalid field in the request body,
/// - [Error::CategoryNotFound] if `category_id` does not refer to a valid category,
/// - [Error::CategoryModificationDenied] if the category is a default
///   category or belongs to another user.
pub async fn update_category_endpoint(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(category_id): Path<DatabaseID>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<CategoryResponse>, Error> {
    let (name, description, color) = request.validate()?;

    let category = update_category(
        &state.category_store,
        user.id(),
        category_id,
        CategoryUpdate {
            name,
            description,
            color,
            category_type: request.category_type,
        },
    )?;

    Ok(Json(CategoryResponse::from(&category)))
}
