//! Cart request and response DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Put a variant into a user's cart.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddCartItemRequest {
    /// Cart owner.
    pub user_id: Uuid,
    /// Variant to add.
    pub variant_id: Uuid,
    /// Units to add.
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Change the quantity of a cart line. Zero removes the line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCartItemRequest {
    /// New quantity.
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,
}

/// A stored cart row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemResponse {
    /// Row ID.
    pub id: Uuid,
    /// Cart owner.
    pub user_id: Uuid,
    /// Variant.
    pub variant_id: Uuid,
    /// Units.
    pub quantity: i32,
    /// When the variant was first added.
    pub created_at: DateTime<Utc>,
}

/// A priced cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Cart row.
    pub item_id: Uuid,
    /// Variant.
    pub variant_id: Uuid,
    /// Product of the variant.
    pub product_id: Uuid,
    /// Product name.
    pub product_name: String,
    /// Variant SKU.
    pub sku: String,
    /// Size.
    pub size: Option<String>,
    /// Colour.
    pub color: Option<String>,
    /// Units.
    pub quantity: i32,
    /// Current variant price.
    pub unit_price: Decimal,
    /// `unit_price * quantity`.
    pub line_total: Decimal,
    /// Whether the variant is purchasable with enough stock.
    pub available: bool,
}

/// The priced contents of a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    /// Cart owner.
    pub user_id: Uuid,
    /// Lines in the order they were added.
    pub lines: Vec<CartLine>,
    /// Total units over all lines.
    pub item_count: i64,
    /// Sum of line totals.
    pub subtotal: Decimal,
}

impl CartSummary {
    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
