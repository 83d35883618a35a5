//! Product variant (SKU) entity model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

/// A purchasable size/color combination of a product.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductVariant {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Parent product.
    pub product_id: Uuid,
    /// Stock keeping unit, unique among live variants.
    pub sku: String,
    /// Size label, e.g. `"UK 9"`.
    pub size: Option<String>,
    /// Color label.
    pub color: Option<String>,
    /// Unit price.
    pub price: Decimal,
    /// Units on hand. Never negative.
    pub stock_quantity: i32,
}

impl ProductVariant {
    /// Whether `quantity` units can be taken from stock.
    pub fn has_stock(&self, quantity: i32) -> bool {
        quantity > 0 && self.stock_quantity >= quantity
    }

    /// Whether the variant can be put in a cart at all.
    pub fn is_purchasable(&self) -> bool {
        self.audit.is_active && !self.audit.is_deleted
    }
}

impl Entity for ProductVariant {
    const NAME: &'static str = "Product variant";
    const TABLE: &'static str = "product_variants";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "product_id",
        "sku",
        "size",
        "color",
        "price",
        "stock_quantity",
    ];

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        Some(match name {
            "product_id" => self.product_id.into(),
            "sku" => self.sku.as_str().into(),
            "size" => self.size.clone().into(),
            "color" => self.color.clone().into(),
            "price" => self.price.into(),
            "stock_quantity" => self.stock_quantity.into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("product_variants_sku", self.sku.to_uppercase())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_stock() {
        let variant = ProductVariant {
            audit: Audit::default(),
            product_id: Uuid::new_v4(),
            sku: "GX1234-42".into(),
            size: Some("42".into()),
            color: None,
            price: Decimal::new(12000, 2),
            stock_quantity: 3,
        };
        assert!(variant.has_stock(3));
        assert!(!variant.has_stock(4));
        assert!(!variant.has_stock(0));
        assert!(variant.is_purchasable());
    }
}
