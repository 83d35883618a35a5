//! Placing, cancelling and advancing orders.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_core::error::ErrorKind;
use storefront_core::traits::Repository;
use storefront_core::types::{PageRequest, QuerySpec};
use storefront_database::Repositories;
use storefront_entity::cart::CartItem;
use storefront_entity::coupon::DiscountType;
use storefront_entity::order::{OrderItem, OrderStatus};
use storefront_service::cart::AddCartItemRequest;
use storefront_service::order::PlaceOrderRequest;

use crate::helpers::{SwitchableRepository, TestApp, money, utc};

fn place(user_id: Uuid) -> PlaceOrderRequest {
    PlaceOrderRequest {
        user_id,
        shipping_address_id: None,
        coupon_code: None,
        notes: None,
    }
}

async fn fill_cart(app: &TestApp, user_id: Uuid, variant_id: Uuid, quantity: i32) {
    app.services
        .cart
        .add_item(
            &app.ctx(),
            AddCartItemRequest {
                user_id,
                variant_id,
                quantity,
            },
        )
        .await
        .expect("Failed to add to cart");
}

#[tokio::test]
async fn test_order_below_threshold_pays_shipping() {
    let app = TestApp::new();
    let user = app.create_user("Shopper@Example.com").await;
    app.create_address(user.id, "Herzogenaurach").await;
    let variant = app.create_stocked_variant("Tiro Pants", "TIRO-M", money(4_999), 5).await;
    fill_cart(&app, user.id, variant.id, 2).await;

    let order = app
        .services
        .orders
        .place_order(&app.ctx(), place(user.id))
        .await
        .expect("place order");

    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.order_number.starts_with("ORD-"));
    assert_eq!(order.subtotal, money(9_998));
    assert_eq!(order.discount_amount, Decimal::ZERO);
    assert_eq!(order.shipping_fee, money(799));
    assert_eq!(order.total_amount, money(10_797));

    let items = order.items.expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].sku, "TIRO-M");
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].line_total, money(9_998));
}

#[tokio::test]
async fn test_checkout_reserves_stock_and_clears_cart() {
    let app = TestApp::new();
    let user = app.create_user("reserve@example.com").await;
    app.create_address(user.id, "Portland").await;
    let variant = app.create_stocked_variant("Ultraboost 1.0", "UB1-43", money(19_000), 5).await;
    fill_cart(&app, user.id, variant.id, 3).await;

    let order = app
        .services
        .orders
        .place_order(&app.ctx(), place(user.id))
        .await
        .expect("place order");
    assert_eq!(order.shipping_fee, Decimal::ZERO);
    assert_eq!(order.total_amount, money(57_000));

    let stocked = app
        .services
        .variants
        .crud()
        .get_by_id(variant.id, &[])
        .await
        .expect("get")
        .expect("variant");
    assert_eq!(stocked.stock_quantity, 2);
    assert!(app.services.cart.items(user.id).await.expect("items").is_empty());

    let sent = app.email.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "reserve@example.com");
    assert!(sent[0].subject.contains(&order.order_number));
}

#[tokio::test]
async fn test_coupon_discount_and_free_shipping() {
    let app = TestApp::new();
    let user = app.create_user("coupon@example.com").await;
    app.create_address(user.id, "Amsterdam").await;
    let coupon = app.create_coupon("SAVE10", DiscountType::Percentage, Decimal::from(10)).await;
    let variant = app.create_stocked_variant("Trefoil Hoodie", "HOOD-L", money(6_000), 5).await;
    fill_cart(&app, user.id, variant.id, 2).await;

    let ctx = app.ctx().at(utc(2024, 6, 1));
    let order = app
        .services
        .orders
        .place_order(
            &ctx,
            PlaceOrderRequest {
                coupon_code: Some("save10".into()),
                ..place(user.id)
            },
        )
        .await
        .expect("place order");

    assert_eq!(order.coupon_id, Some(coupon.id));
    assert_eq!(order.subtotal, money(12_000));
    assert_eq!(order.discount_amount, money(1_200));
    assert_eq!(order.shipping_fee, Decimal::ZERO);
    assert_eq!(order.total_amount, money(10_800));

    let redeemed = app
        .services
        .coupons
        .get_by_code("SAVE10")
        .await
        .expect("get")
        .expect("coupon");
    assert_eq!(redeemed.used_count, 1);
}

#[tokio::test]
async fn test_discount_below_threshold_brings_back_shipping() {
    let app = TestApp::new();
    let user = app.create_user("threshold@example.com").await;
    app.create_address(user.id, "Lyon").await;
    app.create_coupon("SAVE10", DiscountType::Percentage, Decimal::from(10)).await;
    let variant = app.create_stocked_variant("Stan Smith", "STAN-42", money(10_500), 5).await;
    fill_cart(&app, user.id, variant.id, 1).await;

    let order = app
        .services
        .orders
        .place_order(
            &app.ctx().at(utc(2024, 6, 1)),
            PlaceOrderRequest {
                coupon_code: Some("SAVE10".into()),
                ..place(user.id)
            },
        )
        .await
        .expect("place order");

    assert_eq!(order.discount_amount, money(1_050));
    assert_eq!(order.shipping_fee, money(799));
    assert_eq!(order.total_amount, money(10_249));
}

#[tokio::test]
async fn test_expired_coupon_blocks_checkout() {
    let app = TestApp::new();
    let user = app.create_user("expired@example.com").await;
    app.create_address(user.id, "Madrid").await;
    app.create_coupon("SAVE10", DiscountType::Percentage, Decimal::from(10)).await;
    let variant = app.create_stocked_variant("Copa", "COPA-42", money(9_000), 5).await;
    fill_cart(&app, user.id, variant.id, 1).await;

    let err = app
        .services
        .orders
        .place_order(
            &app.ctx().at(utc(2025, 2, 1)),
            PlaceOrderRequest {
                coupon_code: Some("SAVE10".into()),
                ..place(user.id)
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));

    let untouched = app.services.variants.get_by_sku("COPA-42").await.expect("get").expect("variant");
    assert_eq!(untouched.stock_quantity, 5);
    assert_eq!(app.services.cart.items(user.id).await.expect("items").len(), 1);
}

#[tokio::test]
async fn test_empty_cart_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("empty@example.com").await;
    app.create_address(user.id, "Berlin").await;

    let err = app
        .services
        .orders
        .place_order(&app.ctx(), place(user.id))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
    assert!(app.email.sent().is_empty());
}

#[tokio::test]
async fn test_missing_address_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("noaddress@example.com").await;
    let variant = app.create_stocked_variant("Adilette", "ADI-40", money(3_500), 5).await;
    fill_cart(&app, user.id, variant.id, 1).await;

    let err = app
        .services
        .orders
        .place_order(&app.ctx(), place(user.id))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
}

#[tokio::test]
async fn test_someone_elses_address_is_not_found() {
    let app = TestApp::new();
    let user = app.create_user("mine@example.com").await;
    let other = app.create_user("theirs@example.com").await;
    app.create_address(user.id, "Paris").await;
    let foreign = app.create_address(other.id, "Rome").await;
    let variant = app.create_stocked_variant("Samba", "SAMBA-41", money(10_000), 5).await;
    fill_cart(&app, user.id, variant.id, 1).await;

    let err = app
        .services
        .orders
        .place_order(
            &app.ctx(),
            PlaceOrderRequest {
                shipping_address_id: Some(foreign.id),
                ..place(user.id)
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_cancel_restocks() {
    let app = TestApp::new();
    let user = app.create_user("cancel@example.com").await;
    app.create_address(user.id, "Vienna").await;
    let variant = app.create_stocked_variant("Gazelle Indoor", "GZI-42", money(11_000), 4).await;
    fill_cart(&app, user.id, variant.id, 3).await;
    let order = app
        .services
        .orders
        .place_order(&app.ctx(), place(user.id))
        .await
        .expect("place order");

    let cancelled = app
        .services
        .orders
        .cancel(order.id)
        .await
        .expect("cancel")
        .expect("order");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let restocked = app.services.variants.get_by_sku("GZI-42").await.expect("get").expect("variant");
    assert_eq!(restocked.stock_quantity, 4);

    let err = app.services.orders.cancel(order.id).await.unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
}

#[tokio::test]
async fn test_status_follows_lifecycle() {
    let app = TestApp::new();
    let user = app.create_user("lifecycle@example.com").await;
    app.create_address(user.id, "Oslo").await;
    let variant = app.create_stocked_variant("Terrex", "TERREX-44", money(15_000), 2).await;
    fill_cart(&app, user.id, variant.id, 1).await;
    let order = app
        .services
        .orders
        .place_order(&app.ctx(), place(user.id))
        .await
        .expect("place order");

    let err = app
        .services
        .orders
        .update_status(order.id, OrderStatus::Shipped)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));

    for status in [OrderStatus::Paid, OrderStatus::Processing, OrderStatus::Shipped] {
        let updated = app
            .services
            .orders
            .update_status(order.id, status)
            .await
            .expect("transition")
            .expect("order");
        assert_eq!(updated.status, status);
    }

    let err = app.services.orders.cancel(order.id).await.unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
    assert!(
        app.services
            .orders
            .update_status(Uuid::new_v4(), OrderStatus::Paid)
            .await
            .expect("missing order")
            .is_none()
    );
}

#[tokio::test]
async fn test_order_lookup_and_history() {
    let app = TestApp::new();
    let user = app.create_user("history@example.com").await;
    app.create_address(user.id, "Munich").await;
    let variant = app.create_stocked_variant("Predator Club", "PRC-42", money(5_000), 10).await;

    let mut numbers = Vec::new();
    for _ in 0..2 {
        fill_cart(&app, user.id, variant.id, 1).await;
        let order = app
            .services
            .orders
            .place_order(&app.ctx(), place(user.id))
            .await
            .expect("place order");
        numbers.push(order.order_number);
    }

    let found = app
        .services
        .orders
        .get_by_number(&numbers[0])
        .await
        .expect("lookup")
        .expect("order");
    assert_eq!(found.items.as_ref().map(Vec::len), Some(1));
    assert_eq!(found.payments.as_ref().map(Vec::len), Some(0));

    let history = app
        .services
        .orders
        .list_for_user(user.id, &PageRequest::new(1, 10))
        .await
        .expect("history");
    assert_eq!(history.total_items, 2);

    let pending = app
        .services
        .orders
        .list(Some(OrderStatus::Pending), &PageRequest::new(1, 10))
        .await
        .expect("pending");
    assert_eq!(pending.total_items, 2);
    let paid = app
        .services
        .orders
        .list(Some(OrderStatus::Paid), &PageRequest::new(1, 10))
        .await
        .expect("paid");
    assert_eq!(paid.total_items, 0);
}

async fn assert_checkout_undone(app: &TestApp, user_id: Uuid, sku: &str) {
    let variant = app.services.variants.get_by_sku(sku).await.expect("get").expect("variant");
    assert_eq!(variant.stock_quantity, 5);
    assert_eq!(app.services.cart.items(user_id).await.expect("items").len(), 1);

    let coupon = app
        .services
        .coupons
        .get_by_code("SAVE10")
        .await
        .expect("get")
        .expect("coupon");
    assert_eq!(coupon.used_count, 0);

    assert_eq!(app.repos.orders.count(&QuerySpec::new()).await.expect("count"), 0);
    assert_eq!(
        app.repos.orders.count(&QuerySpec::new().with_deleted()).await.expect("count"),
        1
    );
    assert_eq!(app.repos.order_items.count(&QuerySpec::new()).await.expect("count"), 0);
}

#[tokio::test]
async fn test_failed_order_lines_undo_checkout() {
    let mut repos = Repositories::memory();
    repos.order_items = Arc::new(SwitchableRepository::<OrderItem>::rejecting()) as Arc<dyn Repository<OrderItem>>;
    let app = TestApp::with_repos(repos);
    let user = app.create_user("lines@example.com").await;
    app.create_address(user.id, "Porto").await;
    app.create_coupon("SAVE10", DiscountType::Percentage, Decimal::from(10)).await;
    let variant = app.create_stocked_variant("Adizero Boston", "ADZ-42", money(6_000), 5).await;
    fill_cart(&app, user.id, variant.id, 2).await;

    let err = app
        .services
        .orders
        .place_order(
            &app.ctx().at(utc(2024, 6, 1)),
            PlaceOrderRequest {
                coupon_code: Some("SAVE10".into()),
                ..place(user.id)
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Database));

    assert_checkout_undone(&app, user.id, "ADZ-42").await;
    assert!(app.email.sent().is_empty());
}

#[tokio::test]
async fn test_failed_cart_clear_undoes_checkout() {
    let cart_items = Arc::new(SwitchableRepository::<CartItem>::new());
    let mut repos = Repositories::memory();
    repos.cart_items = Arc::clone(&cart_items) as Arc<dyn Repository<CartItem>>;
    let app = TestApp::with_repos(repos);
    let user = app.create_user("clear@example.com").await;
    app.create_address(user.id, "Leeds").await;
    app.create_coupon("SAVE10", DiscountType::Percentage, Decimal::from(10)).await;
    let variant = app.create_stocked_variant("Predator Elite", "PRED-42", money(6_000), 5).await;
    fill_cart(&app, user.id, variant.id, 2).await;
    cart_items.set_reject_writes(true);

    let err = app
        .services
        .orders
        .place_order(
            &app.ctx().at(utc(2024, 6, 1)),
            PlaceOrderRequest {
                coupon_code: Some("SAVE10".into()),
                ..place(user.id)
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Database));

    assert_checkout_undone(&app, user.id, "PRED-42").await;
    assert_eq!(
        app.repos.order_items.count(&QuerySpec::new().with_deleted()).await.expect("count"),
        1
    );
}
