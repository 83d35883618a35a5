//! Payment entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::Entity;
use storefront_core::types::{Audit, FilterValue};

use super::method::PaymentMethod;
use super::status::PaymentStatus;

/// A payment recorded against an order.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Paid order.
    pub order_id: Uuid,
    /// Amount charged.
    pub amount: Decimal,
    /// Payment instrument.
    pub method: PaymentMethod,
    /// Settlement state.
    pub status: PaymentStatus,
    /// Reference returned by the payment provider.
    pub transaction_reference: Option<String>,
    /// When the payment completed.
    pub paid_at: Option<DateTime<Utc>>,
}

impl Entity for Payment {
    const NAME: &'static str = "Payment";
    const TABLE: &'static str = "payments";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "order_id",
        "amount",
        "method",
        "status",
        "transaction_reference",
        "paid_at",
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
            "amount" => self.amount.into(),
            "method" => self.method.as_str().into(),
            "status" => self.status.as_str().into(),
            "transaction_reference" => self.transaction_reference.clone().into(),
            "paid_at" => self.paid_at.into(),
            _ => return self.audit.field(name),
        })
    }
}
