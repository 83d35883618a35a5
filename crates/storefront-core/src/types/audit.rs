//! The audit block embedded in every persisted entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::filter::FilterValue;

/// Identity, timestamps, creator and the deleted/active flag pair.
///
/// A default `Audit` has a nil id and epoch timestamps; repositories treat
/// both as "unset" and fill them when the entity is first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Audit {
    /// Unique identifier.
    pub id: Uuid,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
    /// The user who created the row.
    pub created_by: Option<Uuid>,
    /// Soft-delete flag. Deleted rows are invisible to default queries.
    pub is_deleted: bool,
    /// Whether the row is enabled. Independent of `is_deleted`.
    pub is_active: bool,
}

impl Audit {
    /// Column names of the audit block, in storage order.
    pub const COLUMNS: [&'static str; 6] = [
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
    ];

    /// An unset audit block attributed to `created_by`.
    pub fn created_by(created_by: Option<Uuid>) -> Self {
        Self {
            created_by,
            ..Self::default()
        }
    }

    /// Whether the identity still needs to be assigned.
    pub fn is_unsaved(&self) -> bool {
        self.id.is_nil()
    }

    /// Fill identity and timestamps that are still unset.
    pub fn stamp_new(&mut self, now: DateTime<Utc>) {
        if self.id.is_nil() {
            self.id = Uuid::new_v4();
        }
        if self.created_at == DateTime::<Utc>::default() {
            self.created_at = now;
        }
        self.updated_at = now;
    }

    /// Value of an audit column, or `None` if `name` is not one.
    pub fn field(&self, name: &str) -> Option<FilterValue> {
        Some(match name {
            "id" => self.id.into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            "created_by" => self.created_by.into(),
            "is_deleted" => self.is_deleted.into(),
            "is_active" => self.is_active.into(),
            _ => return None,
        })
    }
}

impl Default for Audit {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
            created_by: None,
            is_deleted: false,
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamp_new_fills_unset_fields_only() {
        let mut audit = Audit::default();
        let now = Utc::now();
        audit.stamp_new(now);
        assert!(!audit.id.is_nil());
        assert_eq!(audit.created_at, now);

        let id = audit.id;
        let later = now + chrono::Duration::seconds(5);
        audit.stamp_new(later);
        assert_eq!(audit.id, id);
        assert_eq!(audit.created_at, now);
        assert_eq!(audit.updated_at, later);
    }

    #[test]
    fn test_field_lookup() {
        let audit = Audit::default();
        assert_eq!(audit.field("is_active"), Some(FilterValue::Boolean(true)));
        assert_eq!(audit.field("created_by"), Some(FilterValue::Null));
        assert_eq!(audit.field("name"), None);
    }
}
