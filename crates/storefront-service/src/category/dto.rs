//! Category request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Create category request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// URL key. Derived from the name when absent.
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Parent category.
    pub parent_id: Option<Uuid>,
}

/// Partial category update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    /// New name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// New slug.
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New parent.
    pub parent_id: Option<Uuid>,
    /// Move the category to the root. Cannot be combined with `parent_id`.
    #[serde(default)]
    pub clear_parent: bool,
}

/// Category as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Slug.
    pub slug: String,
    /// Description.
    pub description: Option<String>,
    /// Parent category.
    pub parent_id: Option<Uuid>,
    /// Whether the category is shown.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Direct children, when `subcategories` was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategories: Option<Vec<CategoryResponse>>,
}
