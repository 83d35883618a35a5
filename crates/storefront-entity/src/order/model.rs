//! Order entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

use super::status::OrderStatus;

/// A placed order. Line items and payments live in their own tables.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Human-facing reference, `PREFIX-YYYYMMDD-XXXXXXXX`.
    pub order_number: String,
    /// Customer.
    pub user_id: Uuid,
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// Delivery address.
    pub shipping_address_id: Option<Uuid>,
    /// Applied coupon.
    pub coupon_id: Option<Uuid>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Coupon discount.
    pub discount_amount: Decimal,
    /// Delivery charge.
    pub shipping_fee: Decimal,
    /// `subtotal - discount_amount + shipping_fee`.
    pub total_amount: Decimal,
    /// Customer notes.
    pub notes: Option<String>,
}

impl Order {
    /// Build an order number from a prefix, the placement date and a random suffix.
    pub fn generate_number(prefix: &str, placed_at: DateTime<Utc>) -> String {
        let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        format!("{prefix}-{}-{suffix}", placed_at.format("%Y%m%d"))
    }

    /// `subtotal - discount + shipping`, never negative.
    pub fn compute_total(subtotal: Decimal, discount: Decimal, shipping_fee: Decimal) -> Decimal {
        (subtotal - discount).max(Decimal::ZERO) + shipping_fee
    }
}

impl Entity for Order {
    const NAME: &'static str = "Order";
    const TABLE: &'static str = "orders";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "order_number",
        "user_id",
        "status",
        "shipping_address_id",
        "coupon_id",
        "subtotal",
        "discount_amount",
        "shipping_fee",
        "total_amount",
        "notes",
    ];
    const RELATIONS: &'static [&'static str] = &["items", "payments"];

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        Some(match name {
            "order_number" => self.order_number.as_str().into(),
            "user_id" => self.user_id.into(),
            "status" => self.status.as_str().into(),
            "shipping_address_id" => self.shipping_address_id.into(),
            "coupon_id" => self.coupon_id.into(),
            "subtotal" => self.subtotal.into(),
            "discount_amount" => self.discount_amount.into(),
            "shipping_fee" => self.shipping_fee.into(),
            "total_amount" => self.total_amount.into(),
            "notes" => self.notes.clone().into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("orders_order_number", self.order_number.as_str())]
    }
}
