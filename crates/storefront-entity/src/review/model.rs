//! Review entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

/// Lowest accepted rating.
pub const MIN_RATING: i16 = 1;
/// Highest accepted rating.
pub const MAX_RATING: i16 = 5;

/// A customer's rating of a product. One live review per (user, product).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Author.
    pub user_id: Uuid,
    /// Reviewed product.
    pub product_id: Uuid,
    /// Stars, 1 to 5.
    pub rating: i16,
    /// Headline.
    pub title: Option<String>,
    /// Body text.
    pub comment: Option<String>,
    /// Visible in public ratings once moderated.
    pub is_approved: bool,
}

impl Entity for Review {
    const NAME: &'static str = "Review";
    const TABLE: &'static str = "reviews";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "user_id",
        "product_id",
        "rating",
        "title",
        "comment",
        "is_approved",
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
            "product_id" => self.product_id.into(),
            "rating" => self.rating.into(),
            "title" => self.title.clone().into(),
            "comment" => self.comment.clone().into(),
            "is_approved" => self.is_approved.into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new(
            "reviews_user_product",
            format!("{}:{}", self.user_id, self.product_id),
        )]
    }
}
