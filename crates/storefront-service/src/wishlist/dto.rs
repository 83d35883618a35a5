//! Wishlist DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::product::ProductResponse;

/// Remember a product for later.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddWishlistItemRequest {
    /// Wishlist owner.
    pub user_id: Uuid,
    /// Product to remember.
    pub product_id: Uuid,
}

/// Wishlist entry as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistItemResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Owner.
    pub user_id: Uuid,
    /// Product.
    pub product_id: Uuid,
    /// When it was added.
    pub created_at: DateTime<Utc>,
    /// The product, when `product` was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductResponse>,
}
