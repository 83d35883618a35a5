//! Payment recording and its effect on order status.

use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_core::error::ErrorKind;
use storefront_entity::order::OrderStatus;
use storefront_entity::payment::{PaymentMethod, PaymentStatus};
use storefront_service::cart::AddCartItemRequest;
use storefront_service::order::{OrderResponse, PlaceOrderRequest};
use storefront_service::payment::RecordPaymentRequest;

use crate::helpers::{TestApp, money, utc};

async fn pending_order(app: &TestApp, email: &str) -> OrderResponse {
    let user = app.create_user(email).await;
    app.create_address(user.id, "Herzogenaurach").await;
    let variant = app.create_stocked_variant("Copa Mundial", "COPA-M-42", money(15_000), 5).await;
    app.services
        .cart
        .add_item(
            &app.ctx(),
            AddCartItemRequest {
                user_id: user.id,
                variant_id: variant.id,
                quantity: 1,
            },
        )
        .await
        .expect("add to cart");
    app.services
        .orders
        .place_order(
            &app.ctx(),
            PlaceOrderRequest {
                user_id: user.id,
                shipping_address_id: None,
                coupon_code: None,
                notes: None,
            },
        )
        .await
        .expect("place order")
}

fn payment(order_id: Uuid, amount: Decimal) -> RecordPaymentRequest {
    RecordPaymentRequest {
        order_id,
        amount,
        method: PaymentMethod::Card,
    }
}

async fn order_status(app: &TestApp, id: Uuid) -> OrderStatus {
    app.services
        .orders
        .details(id)
        .await
        .expect("details")
        .expect("order")
        .status
}

#[tokio::test]
async fn test_completed_payment_marks_order_paid() {
    let app = TestApp::new();
    let order = pending_order(&app, "pay@example.com").await;

    let recorded = app
        .services
        .payments
        .record(&app.ctx(), payment(order.id, order.total_amount))
        .await
        .expect("record");
    assert_eq!(recorded.status, PaymentStatus::Pending);
    assert!(recorded.paid_at.is_none());

    let completed = app
        .services
        .payments
        .complete(recorded.id, Some("txn_123".into()), utc(2024, 6, 1))
        .await
        .expect("complete");
    assert_eq!(completed.status, PaymentStatus::Completed);
    assert_eq!(completed.transaction_reference.as_deref(), Some("txn_123"));
    assert_eq!(completed.paid_at, Some(utc(2024, 6, 1)));
    assert_eq!(order_status(&app, order.id).await, OrderStatus::Paid);

    let details = app
        .services
        .orders
        .details(order.id)
        .await
        .expect("details")
        .expect("order");
    assert_eq!(details.payments.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_partial_payments_accumulate() {
    let app = TestApp::new();
    let order = pending_order(&app, "split@example.com").await;
    let half = order.total_amount / Decimal::from(2);

    let first = app
        .services
        .payments
        .record(&app.ctx(), payment(order.id, half))
        .await
        .expect("record first");
    app.services
        .payments
        .complete(first.id, None, utc(2024, 6, 1))
        .await
        .expect("complete first");
    assert_eq!(order_status(&app, order.id).await, OrderStatus::Pending);

    let second = app
        .services
        .payments
        .record(&app.ctx(), payment(order.id, order.total_amount - half))
        .await
        .expect("record second");
    app.services
        .payments
        .complete(second.id, None, utc(2024, 6, 2))
        .await
        .expect("complete second");
    assert_eq!(order_status(&app, order.id).await, OrderStatus::Paid);

    app.services.payments.refund(first.id).await.expect("refund first");
    assert_eq!(order_status(&app, order.id).await, OrderStatus::Paid);
    app.services.payments.refund(second.id).await.expect("refund second");
    assert_eq!(order_status(&app, order.id).await, OrderStatus::Refunded);

    let listed = app.services.payments.list_for_order(order.id).await.expect("list");
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|p| p.status == PaymentStatus::Refunded));
}

#[tokio::test]
async fn test_failed_payment_leaves_order_pending() {
    let app = TestApp::new();
    let order = pending_order(&app, "fail@example.com").await;
    let recorded = app
        .services
        .payments
        .record(&app.ctx(), payment(order.id, order.total_amount))
        .await
        .expect("record");

    let failed = app.services.payments.fail(recorded.id).await.expect("fail");
    assert_eq!(failed.status, PaymentStatus::Failed);
    assert_eq!(order_status(&app, order.id).await, OrderStatus::Pending);

    let err = app
        .services
        .payments
        .complete(recorded.id, None, utc(2024, 6, 1))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));

    let err = app.services.payments.refund(recorded.id).await.unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
}

#[tokio::test]
async fn test_cancelled_order_takes_no_payments() {
    let app = TestApp::new();
    let order = pending_order(&app, "closed@example.com").await;
    app.services.orders.cancel(order.id).await.expect("cancel");

    let err = app
        .services
        .payments
        .record(&app.ctx(), payment(order.id, order.total_amount))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
}

#[tokio::test]
async fn test_payment_for_unknown_order() {
    let app = TestApp::new();
    let err = app
        .services
        .payments
        .record(&app.ctx(), payment(Uuid::new_v4(), Decimal::from(10)))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_non_positive_amount_is_invalid() {
    let app = TestApp::new();
    let order = pending_order(&app, "zero@example.com").await;
    let err = app
        .services
        .payments
        .record(&app.ctx(), payment(order.id, Decimal::ZERO))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}
