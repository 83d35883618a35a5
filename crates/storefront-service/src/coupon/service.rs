//! Coupon administration, validation and redemption.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository, Service};
use storefront_core::types::{FilterField, QuerySpec};
use storefront_entity::coupon::{Coupon, CouponRejection};
use storefront_entity::money::round_money;

use super::dto::{CouponResponse, CouponValidation, CreateCouponRequest, UpdateCouponRequest};
use super::mapper::CouponMapper;
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Manages discount coupons.
#[derive(Clone)]
pub struct CouponService {
    /// Generic CRUD over coupons.
    crud: CrudService<CouponMapper>,
}

impl CouponService {
    /// Creates a new coupon service.
    pub fn new(coupons: Arc<dyn Repository<Coupon>>) -> Self {
        Self {
            crud: CrudService::new(coupons, CouponMapper),
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<CouponMapper> {
        &self.crud
    }

    /// Creates a coupon. Codes are unique regardless of case.
    pub async fn create(&self, ctx: &RequestContext, req: CreateCouponRequest) -> AppResult<CouponResponse> {
        let coupon = self.crud.build(ctx, req)?;
        if self.find_by_code(&coupon.code).await?.is_some() {
            return Err(AppError::conflict(format!(
                "A coupon with code '{}' already exists",
                coupon.code
            )));
        }
        let created = self.crud.insert(coupon).await?;
        info!(coupon_id = %created.id, code = %created.code, "Coupon created");
        Ok(created)
    }

    /// Applies a partial update.
    pub async fn update(&self, id: Uuid, req: UpdateCouponRequest) -> AppResult<Option<CouponResponse>> {
        self.crud.update(id, req).await
    }

    /// Looks up a live coupon by code, case-insensitively.
    pub async fn get_by_code(&self, code: &str) -> AppResult<Option<CouponResponse>> {
        let coupon = self.find_by_code(&Coupon::normalize_code(code)).await?;
        Ok(coupon.map(|c| self.crud.mapper().to_read(&c)))
    }

    /// Checks whether `code` applies to an order of `order_amount` at `now`.
    ///
    /// Rejections are reported in the result, not as errors.
    pub async fn validate(&self, code: &str, order_amount: Decimal, now: DateTime<Utc>) -> AppResult<CouponValidation> {
        let code = Coupon::normalize_code(code);
        let Some(coupon) = self.find_by_code(&code).await? else {
            return Ok(CouponValidation::rejected(code, None, order_amount, CouponRejection::NotFound));
        };
        Ok(Self::evaluate(&coupon, order_amount, now))
    }

    /// Validates and consumes one use of `code`.
    ///
    /// Fails with a business-rule error when the coupon does not apply, so
    /// `used_count` never exceeds `usage_limit`.
    pub async fn redeem(&self, code: &str, order_amount: Decimal, now: DateTime<Utc>) -> AppResult<CouponValidation> {
        let code = Coupon::normalize_code(code);
        let mut coupon = self
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::business_rule(format!("Coupon '{code}' is not valid: not_found")))?;
        let validation = Self::evaluate(&coupon, order_amount, now);
        if let Some(reason) = validation.reason {
            warn!(code = %code, %reason, "Coupon rejected");
            return Err(AppError::business_rule(format!("Coupon '{code}' is not valid: {reason}")));
        }
        coupon.used_count += 1;
        let coupon = self.crud.repository().update(coupon).await?;
        info!(coupon_id = %coupon.audit.id, code = %code, used_count = coupon.used_count, "Coupon redeemed");
        Ok(validation)
    }

    /// Gives back one use of `code` taken by [`CouponService::redeem`].
    ///
    /// `used_count` never drops below zero. Returns `false` when no live
    /// coupon has that code.
    pub async fn release(&self, code: &str) -> AppResult<bool> {
        let code = Coupon::normalize_code(code);
        let Some(mut coupon) = self.find_by_code(&code).await? else {
            return Ok(false);
        };
        coupon.used_count = (coupon.used_count - 1).max(0);
        let coupon = self.crud.repository().update(coupon).await?;
        info!(coupon_id = %coupon.audit.id, code = %code, used_count = coupon.used_count, "Coupon use released");
        Ok(true)
    }

    fn evaluate(coupon: &Coupon, order_amount: Decimal, now: DateTime<Utc>) -> CouponValidation {
        match coupon.check(order_amount, now) {
            Ok(()) => {
                let discount_amount = coupon.discount_for(order_amount);
                CouponValidation {
                    is_valid: true,
                    coupon_id: Some(coupon.audit.id),
                    code: coupon.code.clone(),
                    discount_amount,
                    final_amount: round_money(order_amount - discount_amount),
                    reason: None,
                }
            }
            Err(reason) => CouponValidation::rejected(
                coupon.code.clone(),
                Some(coupon.audit.id),
                order_amount,
                reason,
            ),
        }
    }

    async fn find_by_code(&self, normalized: &str) -> AppResult<Option<Coupon>> {
        self.crud
            .repository()
            .find(&QuerySpec::new().filter(FilterField::eq("code", normalized)))
            .await
    }
}

impl Service for CouponService {}
