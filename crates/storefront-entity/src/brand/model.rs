//! Brand entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

/// A manufacturer or product line shown in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brand {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Display name.
    pub name: String,
    /// URL-safe unique key.
    pub slug: String,
    /// Marketing copy.
    pub description: Option<String>,
    /// Logo image location.
    pub logo_url: Option<String>,
}

impl Entity for Brand {
    const NAME: &'static str = "Brand";
    const TABLE: &'static str = "brands";
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
        "logo_url",
    ];
    const RELATIONS: &'static [&'static str] = &["products"];

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
            "logo_url" => self.logo_url.clone().into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("brands_slug", self.slug.as_str())]
    }
}
