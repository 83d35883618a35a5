//! Variant request and response DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::non_negative;

/// Create variant request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVariantRequest {
    /// Owning product.
    pub product_id: Uuid,
    /// Stock keeping unit. Stored upper case.
    #[validate(length(min = 1, max = 64, message = "SKU must be 1-64 characters"))]
    pub sku: String,
    /// Size label.
    #[validate(length(max = 20))]
    pub size: Option<String>,
    /// Colour name.
    #[validate(length(max = 50))]
    pub color: Option<String>,
    /// Price. Defaults to the product's base price.
    #[validate(custom(function = "non_negative"))]
    pub price: Option<Decimal>,
    /// Units on hand.
    #[validate(range(min = 0, message = "Stock quantity must not be negative"))]
    #[serde(default)]
    pub stock_quantity: i32,
}

/// Partial variant update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateVariantRequest {
    /// New SKU.
    #[validate(length(min = 1, max = 64, message = "SKU must be 1-64 characters"))]
    pub sku: Option<String>,
    /// New size.
    #[validate(length(max = 20))]
    pub size: Option<String>,
    /// New colour.
    #[validate(length(max = 50))]
    pub color: Option<String>,
    /// New price.
    #[validate(custom(function = "non_negative"))]
    pub price: Option<Decimal>,
    /// New stock level.
    #[validate(range(min = 0, message = "Stock quantity must not be negative"))]
    pub stock_quantity: Option<i32>,
}

/// Variant as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResponse {
    /// Variant ID.
    pub id: Uuid,
    /// Owning product.
    pub product_id: Uuid,
    /// SKU.
    pub sku: String,
    /// Size.
    pub size: Option<String>,
    /// Colour.
    pub color: Option<String>,
    /// Price.
    pub price: Decimal,
    /// Units on hand.
    pub stock_quantity: i32,
    /// Whether the variant can be bought.
    pub is_active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}
