//! Address entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::Entity;
use storefront_core::types::{Audit, FilterValue};

/// A postal address in a user's address book.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Address {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Owner.
    pub user_id: Uuid,
    /// Recipient name.
    pub full_name: String,
    /// Recipient phone.
    pub phone: Option<String>,
    /// Street line.
    pub line1: String,
    /// Apartment, suite, etc.
    pub line2: Option<String>,
    /// City.
    pub city: String,
    /// State, province or region.
    pub state: Option<String>,
    /// Postal code.
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
    /// The user's default shipping address. At most one per user.
    pub is_default: bool,
}

impl Address {
    /// Single-line rendering for labels and tables.
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.line1.as_str()];
        if let Some(line2) = &self.line2 {
            parts.push(line2);
        }
        parts.push(&self.city);
        if let Some(state) = &self.state {
            parts.push(state);
        }
        parts.push(&self.postal_code);
        parts.push(&self.country);
        parts.join(", ")
    }
}

impl Entity for Address {
    const NAME: &'static str = "Address";
    const TABLE: &'static str = "addresses";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "user_id",
        "full_name",
        "phone",
        "line1",
        "line2",
        "city",
        "state",
        "postal_code",
        "country",
        "is_default",
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
            "full_name" => self.full_name.as_str().into(),
            "phone" => self.phone.clone().into(),
            "line1" => self.line1.as_str().into(),
            "line2" => self.line2.clone().into(),
            "city" => self.city.as_str().into(),
            "state" => self.state.clone().into(),
            "postal_code" => self.postal_code.as_str().into(),
            "country" => self.country.as_str().into(),
            "is_default" => self.is_default.into(),
            _ => return self.audit.field(name),
        })
    }
}
