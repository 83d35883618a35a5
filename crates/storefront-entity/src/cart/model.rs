//! Cart item entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

/// One variant line in a user's cart.
///
/// A user holds at most one live row per variant; adding the same variant
/// again raises the quantity instead.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Cart owner.
    pub user_id: Uuid,
    /// Chosen variant.
    pub variant_id: Uuid,
    /// Units requested. Always positive.
    pub quantity: i32,
}

impl Entity for CartItem {
    const NAME: &'static str = "Cart item";
    const TABLE: &'static str = "cart_items";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "user_id",
        "variant_id",
        "quantity",
    ];

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        Some(match name {
            "user_id" => self.user_id.into(),
            "variant_id" => self.variant_id.into(),
            "quantity" => self.quantity.into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(
            "cart_items_user_variant",
            format!("{}:{}", self.user_id, self.variant_id),
        )]
    }
}
