//! Coupon entity/DTO mapping.

use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::Mapper;
use storefront_core::types::Audit;
use storefront_entity::coupon::{Coupon, DiscountType};

use super::dto::{CouponResponse, CreateCouponRequest, UpdateCouponRequest};

/// Maps [`Coupon`] to and from its DTOs.
#[derive(Debug, Clone, Default)]
pub struct CouponMapper;

impl Mapper for CouponMapper {
    type Entity = Coupon;
    type Read = CouponResponse;
    type Create = CreateCouponRequest;
    type Update = UpdateCouponRequest;

    fn to_read(&self, coupon: &Coupon) -> CouponResponse {
        CouponResponse {
            id: coupon.audit.id,
            code: coupon.code.clone(),
            description: coupon.description.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            minimum_order_amount: coupon.minimum_order_amount,
            maximum_discount_amount: coupon.maximum_discount_amount,
            valid_from: coupon.valid_from,
            valid_to: coupon.valid_to,
            usage_limit: coupon.usage_limit,
            used_count: coupon.used_count,
            is_active: coupon.audit.is_active,
        }
    }

    fn from_create(&self, dto: CreateCouponRequest, created_by: Option<Uuid>) -> AppResult<Coupon> {
        Ok(Coupon {
            audit: Audit::created_by(created_by),
            code: Coupon::normalize_code(&dto.code),
            description: dto.description,
            discount_type: dto.discount_type,
            discount_value: dto.discount_value,
            minimum_order_amount: dto.minimum_order_amount,
            maximum_discount_amount: dto.maximum_discount_amount,
            valid_from: dto.valid_from,
            valid_to: dto.valid_to,
            usage_limit: dto.usage_limit,
            used_count: 0,
        })
    }

    /// Cross-field rules are checked on the merged result.
    fn apply_update(&self, coupon: &mut Coupon, dto: UpdateCouponRequest) -> AppResult<()> {
        if let Some(description) = dto.description {
            coupon.description = Some(description);
        }
        if let Some(discount_type) = dto.discount_type {
            coupon.discount_type = discount_type;
        }
        if let Some(discount_value) = dto.discount_value {
            coupon.discount_value = discount_value;
        }
        if let Some(minimum) = dto.minimum_order_amount {
            coupon.minimum_order_amount = Some(minimum);
        }
        if let Some(maximum) = dto.maximum_discount_amount {
            coupon.maximum_discount_amount = Some(maximum);
        }
        if let Some(valid_from) = dto.valid_from {
            coupon.valid_from = valid_from;
        }
        if let Some(valid_to) = dto.valid_to {
            coupon.valid_to = valid_to;
        }
        if let Some(usage_limit) = dto.usage_limit {
            coupon.usage_limit = Some(usage_limit);
        }

        if coupon.valid_from > coupon.valid_to {
            return Err(AppError::validation("valid_from must not be after valid_to"));
        }
        if coupon.discount_type == DiscountType::Percentage && coupon.discount_value > Decimal::ONE_HUNDRED {
            return Err(AppError::validation("A percentage discount cannot exceed 100"));
        }
        Ok(())
    }
}
