//! Coupon entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use storefront_core::traits::{Entity, UniqueKey};
use storefront_core::types::{Audit, FilterValue};

use super::discount_type::DiscountType;
use crate::money::round_money;

/// A redeemable discount code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Coupon {
    /// Identity and lifecycle flags.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
    /// Redemption code, stored upper-case.
    pub code: String,
    /// Shown to the customer.
    pub description: Option<String>,
    /// Percentage or fixed amount.
    pub discount_type: DiscountType,
    /// Percent (0-100) or currency amount, depending on `discount_type`.
    pub discount_value: Decimal,
    /// Smallest order amount the coupon applies to.
    pub minimum_order_amount: Option<Decimal>,
    /// Cap on the computed discount.
    pub maximum_discount_amount: Option<Decimal>,
    /// Start of the validity window (inclusive).
    pub valid_from: DateTime<Utc>,
    /// End of the validity window (inclusive).
    pub valid_to: DateTime<Utc>,
    /// Total redemptions allowed. `None` is unlimited.
    pub usage_limit: Option<i32>,
    /// Redemptions so far.
    pub used_count: i32,
}

/// Why a coupon cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CouponRejection {
    /// No live coupon has this code.
    NotFound,
    /// The coupon is disabled.
    Inactive,
    /// The validity window has not started.
    NotYetValid,
    /// The validity window has ended.
    Expired,
    /// `used_count` reached `usage_limit`.
    UsageLimitReached,
    /// The order amount is below `minimum_order_amount`.
    MinimumNotMet,
}

impl CouponRejection {
    /// Return the reason as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Inactive => "inactive",
            Self::NotYetValid => "not_yet_valid",
            Self::Expired => "expired",
            Self::UsageLimitReached => "usage_limit_reached",
            Self::MinimumNotMet => "minimum_not_met",
        }
    }
}

impl fmt::Display for CouponRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Coupon {
    /// Canonical form of a coupon code.
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }

    /// Whether more redemptions are allowed.
    pub fn has_remaining_uses(&self) -> bool {
        self.usage_limit.is_none_or(|limit| self.used_count < limit)
    }

    /// Check every redemption rule for an order of `order_amount` at `now`.
    pub fn check(&self, order_amount: Decimal, now: DateTime<Utc>) -> Result<(), CouponRejection> {
        if !self.audit.is_active {
            return Err(CouponRejection::Inactive);
        }
        if now < self.valid_from {
            return Err(CouponRejection::NotYetValid);
        }
        if now > self.valid_to {
            return Err(CouponRejection::Expired);
        }
        if !self.has_remaining_uses() {
            return Err(CouponRejection::UsageLimitReached);
        }
        if self
            .minimum_order_amount
            .is_some_and(|minimum| order_amount < minimum)
        {
            return Err(CouponRejection::MinimumNotMet);
        }
        Ok(())
    }

    /// Discount granted on `order_amount`, never more than the amount itself.
    pub fn discount_for(&self, order_amount: Decimal) -> Decimal {
        if order_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let raw = match self.discount_type {
            DiscountType::Percentage => order_amount * self.discount_value / Decimal::ONE_HUNDRED,
            DiscountType::FixedAmount => self.discount_value,
        };
        let capped = match self.maximum_discount_amount {
            Some(max) => raw.min(max),
            None => raw,
        };
        round_money(capped.min(order_amount).max(Decimal::ZERO))
    }
}

impl Entity for Coupon {
    const NAME: &'static str = "Coupon";
    const TABLE: &'static str = "coupons";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "created_at",
        "updated_at",
        "created_by",
        "is_deleted",
        "is_active",
        "code",
        "description",
        "discount_type",
        "discount_value",
        "minimum_order_amount",
        "maximum_discount_amount",
        "valid_from",
        "valid_to",
        "usage_limit",
        "used_count",
    ];

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn field(&self, name: &str) -> Option<FilterValue> {
        Some(match name {
            "code" => self.code.as_str().into(),
            "description" => self.description.clone().into(),
            "discount_type" => self.discount_type.as_str().into(),
            "discount_value" => self.discount_value.into(),
            "minimum_order_amount" => self.minimum_order_amount.into(),
            "maximum_discount_amount" => self.maximum_discount_amount.into(),
            "valid_from" => self.valid_from.into(),
            "valid_to" => self.valid_to.into(),
            "usage_limit" => self.usage_limit.into(),
            "used_count" => self.used_count.into(),
            _ => return self.audit.field(name),
        })
    }

    fn unique_keys(&self) -> Vec<UniqueKey> {
        vec![UniqueKey::new("coupons_code", Self::normalize_code(&self.code))]
    }
}
