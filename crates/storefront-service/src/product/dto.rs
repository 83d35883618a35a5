//! Product request and response DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use storefront_core::result::AppResult;
use storefront_core::types::{FilterField, QuerySpec, SortField};

use crate::brand::BrandResponse;
use crate::category::CategoryResponse;
use crate::review::ReviewResponse;
use crate::validation::non_negative;
use crate::variant::VariantResponse;

/// Create product request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProductRequest {
    /// Display name.
    #[validate(length(min = 1, max = 300, message = "Product name must be 1-300 characters"))]
    pub name: String,
    /// URL key. Derived from the name when absent.
    #[validate(length(min = 1, max = 300))]
    pub slug: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Owning brand.
    pub brand_id: Option<Uuid>,
    /// Catalog category.
    pub category_id: Option<Uuid>,
    /// Default price of the product's variants.
    #[validate(custom(function = "non_negative"))]
    pub base_price: Decimal,
}

/// Partial product update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProductRequest {
    /// New name.
    #[validate(length(min = 1, max = 300, message = "Product name must be 1-300 characters"))]
    pub name: Option<String>,
    /// New slug.
    #[validate(length(min = 1, max = 300))]
    pub slug: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New brand.
    pub brand_id: Option<Uuid>,
    /// New category.
    pub category_id: Option<Uuid>,
    /// New base price.
    #[validate(custom(function = "non_negative"))]
    pub base_price: Option<Decimal>,
}

/// Product as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    /// Product ID.
    pub id: Uuid,
    /// Name.
    pub name: String,
    /// Slug.
    pub slug: String,
    /// Description.
    pub description: Option<String>,
    /// Brand.
    pub brand_id: Option<Uuid>,
    /// Category.
    pub category_id: Option<Uuid>,
    /// Base price.
    pub base_price: Decimal,
    /// Whether the product is listed.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Variants, when `variants` was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<VariantResponse>>,
    /// Brand, when `brand` was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<BrandResponse>,
    /// Category, when `category` was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    /// Approved reviews, when `reviews` was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewResponse>>,
}

/// Catalog search parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSearch {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Restrict to one brand.
    pub brand_id: Option<Uuid>,
    /// Restrict to one category.
    pub category_id: Option<Uuid>,
    /// Lowest base price, inclusive.
    pub min_price: Option<Decimal>,
    /// Highest base price, inclusive.
    pub max_price: Option<Decimal>,
    /// Sort expression such as `base_price:desc`.
    pub sort: Option<String>,
    /// Also list deactivated products.
    #[serde(default)]
    pub include_inactive: bool,
    /// Relations to load for each hit.
    #[serde(default)]
    pub includes: Vec<String>,
}

impl ProductSearch {
    /// Translate the search into a `QuerySpec`.
    pub fn to_query(&self) -> AppResult<QuerySpec> {
        let mut spec = QuerySpec::new()
            .filter_opt(
                self.name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .map(|n| FilterField::ilike("name", format!("%{n}%"))),
            )
            .filter_opt(self.brand_id.map(|id| FilterField::eq("brand_id", id)))
            .filter_opt(self.category_id.map(|id| FilterField::eq("category_id", id)))
            .filter_opt(self.min_price.map(|p| FilterField::gte("base_price", p)))
            .filter_opt(self.max_price.map(|p| FilterField::lte("base_price", p)));
        if !self.include_inactive {
            spec = spec.filter(FilterField::eq("is_active", true));
        }
        spec = match self.sort.as_deref() {
            Some(expr) => spec.sort(expr.parse::<SortField>()?),
            None => spec.sort(SortField::asc("name")),
        };
        for include in &self.includes {
            spec = spec.include(include.clone());
        }
        Ok(spec)
    }
}
