//! Coupon validation and redemption.

use rust_decimal::Decimal;

use storefront_core::error::ErrorKind;
use storefront_entity::coupon::{CouponRejection, DiscountType};
use storefront_service::coupon::UpdateCouponRequest;

use crate::helpers::{TestApp, coupon_request, money, utc};

#[tokio::test]
async fn test_percentage_coupon_inside_window() {
    let app = TestApp::new();
    app.create_coupon("SAVE10", DiscountType::Percentage, Decimal::from(10)).await;

    let result = app
        .services
        .coupons
        .validate("save10", Decimal::from(100), utc(2024, 6, 1))
        .await
        .expect("validate");

    assert!(result.is_valid);
    assert_eq!(result.code, "SAVE10");
    assert_eq!(result.discount_amount, Decimal::from(10));
    assert_eq!(result.final_amount, Decimal::from(90));
    assert!(result.reason.is_none());
}

#[tokio::test]
async fn test_coupon_after_window_is_expired() {
    let app = TestApp::new();
    app.create_coupon("SAVE10", DiscountType::Percentage, Decimal::from(10)).await;

    let result = app
        .services
        .coupons
        .validate("SAVE10", Decimal::from(100), utc(2025, 1, 1))
        .await
        .expect("validate");

    assert!(!result.is_valid);
    assert_eq!(result.reason, Some(CouponRejection::Expired));
    assert_eq!(result.discount_amount, Decimal::ZERO);
    assert_eq!(result.final_amount, Decimal::from(100));
}

#[tokio::test]
async fn test_unknown_code_is_reported_not_raised() {
    let app = TestApp::new();
    let result = app
        .services
        .coupons
        .validate("NOPE", Decimal::from(50), utc(2024, 6, 1))
        .await
        .expect("validate");
    assert!(!result.is_valid);
    assert_eq!(result.reason, Some(CouponRejection::NotFound));
    assert!(result.coupon_id.is_none());
}

#[tokio::test]
async fn test_minimum_order_amount() {
    let app = TestApp::new();
    let mut req = coupon_request("BIGSPEND", DiscountType::FixedAmount, Decimal::from(15));
    req.minimum_order_amount = Some(Decimal::from(75));
    app.services.coupons.create(&app.ctx(), req).await.expect("create");

    let low = app
        .services
        .coupons
        .validate("BIGSPEND", money(7_499), utc(2024, 3, 1))
        .await
        .expect("validate");
    assert_eq!(low.reason, Some(CouponRejection::MinimumNotMet));

    let enough = app
        .services
        .coupons
        .validate("BIGSPEND", Decimal::from(75), utc(2024, 3, 1))
        .await
        .expect("validate");
    assert!(enough.is_valid);
    assert_eq!(enough.discount_amount, Decimal::from(15));
}

#[tokio::test]
async fn test_redeem_respects_usage_limit() {
    let app = TestApp::new();
    let mut req = coupon_request("ONCE", DiscountType::FixedAmount, Decimal::from(5));
    req.usage_limit = Some(1);
    let coupon = app.services.coupons.create(&app.ctx(), req).await.expect("create");

    let first = app
        .services
        .coupons
        .redeem("ONCE", Decimal::from(40), utc(2024, 5, 5))
        .await
        .expect("first redemption");
    assert!(first.is_valid);

    let err = app
        .services
        .coupons
        .redeem("ONCE", Decimal::from(40), utc(2024, 5, 5))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
    assert!(err.to_string().contains("usage_limit_reached"));

    let stored = app
        .services
        .coupons
        .crud()
        .get_by_id(coupon.id, &[])
        .await
        .expect("get")
        .expect("present");
    assert_eq!(stored.used_count, 1);
}

#[tokio::test]
async fn test_duplicate_code_conflicts() {
    let app = TestApp::new();
    app.create_coupon("SUMMER", DiscountType::Percentage, Decimal::from(20)).await;
    let err = app
        .services
        .coupons
        .create(&app.ctx(), coupon_request(" summer ", DiscountType::Percentage, Decimal::from(5)))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn test_invalid_terms_are_rejected() {
    let app = TestApp::new();
    let mut backwards = coupon_request("BACKWARDS", DiscountType::Percentage, Decimal::from(10));
    backwards.valid_to = utc(2023, 1, 1);
    let err = app.services.coupons.create(&app.ctx(), backwards).await.unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    let too_much = coupon_request("ALLFREE", DiscountType::Percentage, Decimal::from(150));
    let err = app.services.coupons.create(&app.ctx(), too_much).await.unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}

#[tokio::test]
async fn test_deactivated_coupon_is_inactive() {
    let app = TestApp::new();
    let coupon = app.create_coupon("PAUSED", DiscountType::Percentage, Decimal::from(10)).await;
    assert!(
        app.services
            .coupons
            .crud()
            .set_active_status(coupon.id, false)
            .await
            .expect("deactivate")
    );

    let result = app
        .services
        .coupons
        .validate("PAUSED", Decimal::from(100), utc(2024, 6, 1))
        .await
        .expect("validate");
    assert_eq!(result.reason, Some(CouponRejection::Inactive));
}

#[tokio::test]
async fn test_update_extends_the_window() {
    let app = TestApp::new();
    let coupon = app.create_coupon("LONGER", DiscountType::Percentage, Decimal::from(10)).await;
    app.services
        .coupons
        .update(
            coupon.id,
            UpdateCouponRequest {
                valid_to: Some(utc(2025, 6, 30)),
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("present");

    let result = app
        .services
        .coupons
        .validate("LONGER", Decimal::from(100), utc(2025, 1, 15))
        .await
        .expect("validate");
    assert!(result.is_valid);
}
