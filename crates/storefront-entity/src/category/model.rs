//! Category entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

/// A node in the catalog hierarchy.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Display name.
    pub name: String,
    /// URL-safe unique key.
    pub slug: String,
    /// Optional description.
    pub description: Option<String>,
    /// Parent category (`None` for a root).
    pub parent_id: Option<Uuid>,
}

impl Category {
    /// Whether this is a top-level category.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl Entity for Category {
    const NAME: &'static str = "Category";
    const TABLE: &'static str = "categories";
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
        "parent_id",
    ];
    const RELATIONS: &'static [&'static str] = &["subcategories"];

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
            "parent_id" => self.parent_id.into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("categories_slug", self.slug.as_str())]
    }
}
