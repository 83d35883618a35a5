//! Product entity model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

/// A catalog product. Purchasable SKUs are its variants.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Display name.
    pub name: String,
    /// URL-safe unique key.
    pub slug: String,
    /// Long description.
    pub description: Option<String>,
    /// Owning brand.
    pub brand_id: Option<Uuid>,
    /// Catalog category.
    pub category_id: Option<Uuid>,
    /// Price used when a variant does not override it.
    pub base_price: Decimal,
}

impl Entity for Product {
    const NAME: &'static str = "Product";
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "name",
        "slug",
        "description",
        "brand_id",
        "category_id",
        "base_price",
    ];
    const RELATIONS: &'static [&'static str] = &["variants", "brand", "category", "reviews"];

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        Some(match name {
            "name" => self.name.as_str().into(),
            "slug" => self.slug.as_str().into(),
            "description" => self.description.clone().into(),
            "brand_id" => self.brand_id.into(),
            "category_id" => self.category_id.into(),
            "base_price" => self.base_price.into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("products_slug", self.slug.as_str())]
    }
}
