//! Brand request and response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::product::ProductResponse;

/// Create brand request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBrandRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// URL key. Derived from the name when absent.
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
    /// Marketing copy.
    pub description: Option<String>,
    /// Logo location.
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Partial brand update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateBrandRequest {
    /// New name.
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    /// New slug.
    #[validate(length(min = 1, max = 200))]
    pub slug: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New logo.
    #[validate(url)]
    pub logo_url: Option<String>,
}

/// Brand as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandResponse {
    /// Brand ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Slug.
    pub slug: String,
    /// Description.
    pub description: Option<String>,
    /// Logo.
    pub logo_url: Option<String>,
    /// Whether the brand is shown.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Products, when `products` was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductResponse>>,
}
