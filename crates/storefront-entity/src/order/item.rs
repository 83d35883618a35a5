//! Order line item entity model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::Entity;
use storefront_core::types::{Audit, FilterValue};

/// A purchased variant, with name, SKU and price captured at order time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Owning order.
    pub order_id: Uuid,
    /// Purchased variant.
    pub variant_id: Uuid,
    /// Product name at order time.
    pub product_name: String,
    /// SKU at order time.
    pub sku: String,
    /// Units purchased.
    pub quantity: i32,
    /// Price per unit at order time.
    pub unit_price: Decimal,
    /// `unit_price * quantity`.
    pub line_total: Decimal,
}

impl Entity for OrderItem {
    const NAME: &'static str = "Order item";
    const TABLE: &'static str = "order_items";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "order_id",
        "variant_id",
        "product_name",
        "sku",
        "quantity",
        "unit_price",
        "line_total",
    ];

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        Some(match name {
            "order_id" => self.order_id.into(),
            "variant_id" => self.variant_id.into(),
            "product_name" => self.product_name.as_str().into(),
            "sku" => self.sku.as_str().into(),
            "quantity" => self.quantity.into(),
            "unit_price" => self.unit_price.into(),
            "line_total" => self.line_total.into(),
            _ => return self.audit.field(name),
        })
    }
}
