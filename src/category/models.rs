//! The request and response bodies for the category endpoints.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    models::{Category, CategoryName, DatabaseID, TransactionType},
};

/// The color used when a category request does not specify one.
const DEFAULT_CATEGORY_COLOR: &str = "#FF6B6B";
/// The maximum number of characters a category description may have.
const DESCRIPTION_MAX_LENGTH: usize = 255;
/// The maximum number of characters a category color may have ("#RRGGBB").
const COLOR_MAX_LENGTH: usize = 7;

/// The data for creating or updating a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRequest {
    /// The name of the category.
    pub name: String,
    /// A short description of what belongs in the category.
    pub description: Option<String>,
    /// The hex color used to display the category. Defaults to `#FF6B6B`.
    pub color: Option<String>,
    /// Whether the category classifies income or expenses.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
}

impl CategoryRequest {
    /// Validate the request fields, collecting the failures.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::Validation] listing every field
    /// that failed.
    pub fn validate(&self) -> Result<(CategoryName, Option<String>, String), Error> {
        let mut details = Vec::new();

        let name = CategoryName::new(&self.name);
        if let Err(Error::Validation(name_details)) = &name {
            details.extend(name_details.iter().cloned());
        }

        if let Some(description) = &self.description
            && description.chars().count() > DESCRIPTION_MAX_LENGTH
        {
            details
                .push("description: Description must be at most 255 characters".to_string());
        }

        let color = self
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string());
        if color.chars().count() > COLOR_MAX_LENGTH {
            details.push("color: Color must be at most 7 characters".to_string());
        }

        match name {
            Ok(name) if details.is_empty() => Ok((name, self.description.clone(), color)),
            _ => Err(Error::Validation(details)),
        }
    }
}

/// A category as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// The category's ID.
    pub id: DatabaseID,
    /// The name of the category.
    pub name: String,
    /// A short description of what belongs in the category.
    pub description: Option<String>,
    /// The hex color used to display the category.
    pub color: String,
    /// Whether the category classifies income or expenses.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// Whether this is a system-seeded category.
    pub is_default: bool,
    /// When the category was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the category was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
            description: category.description().map(str::to_string),
            color: category.color().to_string(),
            category_type: category.category_type(),
            is_default: category.ownership().is_default(),
            created_at: category.created_at(),
            updated_at: category.updated_at(),
        }
    }
}
