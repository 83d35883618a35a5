//! Wishlist item entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

/// A product saved by a user for later. One live row per (user, product).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WishlistItem {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Owner.
    pub user_id: Uuid,
    /// Saved product.
    pub product_id: Uuid,
}

impl Entity for WishlistItem {
    const NAME: &'static str = "Wishlist item";
    const TABLE: &'static str = "wishlist_items";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "user_id",
        "product_id",
    ];
    const RELATIONS: &'static [&'static str] = &["product"];

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        Some(match name {
            "user_id" => self.user_id.into(),
            "product_id" => self.product_id.into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(
            "wishlist_items_user_product",
            format!("{}:{}", self.user_id, self.product_id),
        )]
    }
}
