//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

/// A registered customer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Login email, stored lower-case.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact phone number.
    pub phone: Option<String>,
}

impl User {
    /// `first_name last_name`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Canonical form of an email address.
    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}

impl Entity for User {
    const NAME: &'static str = "User";
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "email",
        "first_name",
        "last_name",
        "phone",
    ];

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        Some(match name {
            "email" => self.email.as_str().into(),
            "first_name" => self.first_name.as_str().into(),
            "last_name" => self.last_name.as_str().into(),
            "phone" => self.phone.clone().into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("users_email", Self::normalize_email(&self.email))]
    }
}
