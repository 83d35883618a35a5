//! Coupon request and response DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use storefront_entity::coupon::{CouponRejection, DiscountType};

use crate::validation::{error, non_negative, positive};

/// Create coupon request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_coupon_terms"))]
pub struct CreateCouponRequest {
    /// Redemption code. Stored upper case.
    #[validate(length(min = 3, max = 50, message = "Coupon code must be 3-50 characters"))]
    pub code: String,
    /// Shown to the customer.
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// Percentage or fixed amount.
    pub discount_type: DiscountType,
    /// Percent (up to 100) or currency amount.
    #[validate(custom(function = "positive"))]
    pub discount_value: Decimal,
    /// Smallest order amount the coupon applies to.
    #[validate(custom(function = "non_negative"))]
    pub minimum_order_amount: Option<Decimal>,
    /// Cap on the computed discount.
    #[validate(custom(function = "positive"))]
    pub maximum_discount_amount: Option<Decimal>,
    /// Start of validity.
    pub valid_from: DateTime<Utc>,
    /// End of validity.
    pub valid_to: DateTime<Utc>,
    /// Total redemptions allowed. Unlimited when absent.
    #[validate(range(min = 1, message = "Usage limit must be at least 1"))]
    pub usage_limit: Option<i32>,
}

fn validate_coupon_terms(req: &CreateCouponRequest) -> Result<(), ValidationError> {
    if req.valid_from > req.valid_to {
        return Err(error("window", "valid_from must not be after valid_to"));
    }
    if req.discount_type == DiscountType::Percentage && req.discount_value > Decimal::ONE_HUNDRED {
        return Err(error("percentage", "A percentage discount cannot exceed 100"));
    }
    Ok(())
}

/// Partial coupon update. The code cannot change.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCouponRequest {
    /// New description.
    #[validate(length(max = 500))]
    pub description: Option<String>,
    /// New discount type.
    pub discount_type: Option<DiscountType>,
    /// New discount value.
    #[validate(custom(function = "positive"))]
    pub discount_value: Option<Decimal>,
    /// New minimum order amount.
    #[validate(custom(function = "non_negative"))]
    pub minimum_order_amount: Option<Decimal>,
    /// New discount cap.
    #[validate(custom(function = "positive"))]
    pub maximum_discount_amount: Option<Decimal>,
    /// New start of validity.
    pub valid_from: Option<DateTime<Utc>>,
    /// New end of validity.
    pub valid_to: Option<DateTime<Utc>>,
    /// New usage limit.
    #[validate(range(min = 1, message = "Usage limit must be at least 1"))]
    pub usage_limit: Option<i32>,
}

/// Coupon as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponResponse {
    /// Coupon ID.
    pub id: Uuid,
    /// Code.
    pub code: String,
    /// Description.
    pub description: Option<String>,
    /// Discount type.
    pub discount_type: DiscountType,
    /// Discount value.
    pub discount_value: Decimal,
    /// Minimum order amount.
    pub minimum_order_amount: Option<Decimal>,
    /// Discount cap.
    pub maximum_discount_amount: Option<Decimal>,
    /// Start of validity.
    pub valid_from: DateTime<Utc>,
    /// End of validity.
    pub valid_to: DateTime<Utc>,
    /// Usage limit.
    pub usage_limit: Option<i32>,
    /// Redemptions so far.
    pub used_count: i32,
    /// Whether the coupon is enabled.
    pub is_active: bool,
}

/// Outcome of checking a coupon against an order amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponValidation {
    /// Whether the coupon applies.
    pub is_valid: bool,
    /// The matching coupon, if one exists.
    pub coupon_id: Option<Uuid>,
    /// Normalized code that was checked.
    pub code: String,
    /// Discount granted. Zero when invalid.
    pub discount_amount: Decimal,
    /// Order amount after the discount.
    pub final_amount: Decimal,
    /// Why the coupon does not apply.
    pub reason: Option<CouponRejection>,
}

impl CouponValidation {
    /// A rejection leaving the amount untouched.
    pub fn rejected(code: String, coupon_id: Option<Uuid>, order_amount: Decimal, reason: CouponRejection) -> Self {
        Self {
            is_valid: false,
            coupon_id,
            code,
            discount_amount: Decimal::ZERO,
            final_amount: order_amount,
            reason: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn request() -> CreateCouponRequest {
        CreateCouponRequest {
            code: "save10".into(),
            description: None,
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(10),
            minimum_order_amount: None,
            maximum_discount_amount: None,
            valid_from: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            valid_to: Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap(),
            usage_limit: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_window_must_be_ordered() {
        let mut req = request();
        std::mem::swap(&mut req.valid_from, &mut req.valid_to);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_percentage_capped_at_hundred() {
        let mut req = request();
        req.discount_value = Decimal::from(150);
        assert!(req.validate().is_err());
        req.discount_type = DiscountType::FixedAmount;
        assert!(req.validate().is_ok());
    }
}
