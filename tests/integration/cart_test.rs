//! Shopping cart and wishlist behaviour.

use storefront_core::error::ErrorKind;
use storefront_service::cart::AddCartItemRequest;
use storefront_service::wishlist::AddWishlistItemRequest;

use crate::helpers::{TestApp, money};

fn add(user_id: uuid::Uuid, variant_id: uuid::Uuid, quantity: i32) -> AddCartItemRequest {
    AddCartItemRequest {
        user_id,
        variant_id,
        quantity,
    }
}

#[tokio::test]
async fn test_adding_same_variant_coalesces() {
    let app = TestApp::new();
    let user = app.create_user("coalesce@example.com").await;
    let variant = app.create_stocked_variant("Samba OG", "SAMBA-42", money(10_000), 20).await;

    let first = app
        .services
        .cart
        .add_item(&app.ctx(), add(user.id, variant.id, 1))
        .await
        .expect("first add");
    let second = app
        .services
        .cart
        .add_item(&app.ctx(), add(user.id, variant.id, 2))
        .await
        .expect("second add");

    assert_eq!(first.id, second.id);
    assert_eq!(second.quantity, 3);
    let items = app.services.cart.items(user.id).await.expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);
}

#[tokio::test]
async fn test_quantity_is_capped_per_item() {
    let app = TestApp::new();
    let user = app.create_user("cap@example.com").await;
    let variant = app.create_stocked_variant("Ultraboost", "UB-44", money(18_000), 50).await;

    app.services
        .cart
        .add_item(&app.ctx(), add(user.id, variant.id, 8))
        .await
        .expect("add");
    let item = app
        .services
        .cart
        .add_item(&app.ctx(), add(user.id, variant.id, 8))
        .await
        .expect("add again");
    assert_eq!(item.quantity, app.store.max_quantity_per_item);

    let err = app
        .services
        .cart
        .update_quantity(user.id, variant.id, app.store.max_quantity_per_item + 1)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
}

#[tokio::test]
async fn test_quantity_beyond_stock_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("stock@example.com").await;
    let variant = app.create_stocked_variant("Adizero", "AZ-41", money(14_000), 2).await;

    let err = app
        .services
        .cart
        .add_item(&app.ctx(), add(user.id, variant.id, 3))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
    assert!(app.services.cart.items(user.id).await.expect("items").is_empty());
}

#[tokio::test]
async fn test_inactive_variant_cannot_be_added() {
    let app = TestApp::new();
    let user = app.create_user("inactive@example.com").await;
    let variant = app.create_stocked_variant("Predator", "PRED-43", money(25_000), 5).await;
    app.services
        .variants
        .crud()
        .set_active_status(variant.id, false)
        .await
        .expect("deactivate");

    let err = app
        .services
        .cart
        .add_item(&app.ctx(), add(user.id, variant.id, 1))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
}

#[tokio::test]
async fn test_zero_quantity_removes_line() {
    let app = TestApp::new();
    let user = app.create_user("zero@example.com").await;
    let variant = app.create_stocked_variant("Gazelle", "GZ-40", money(10_000), 5).await;
    app.services
        .cart
        .add_item(&app.ctx(), add(user.id, variant.id, 2))
        .await
        .expect("add");

    let updated = app
        .services
        .cart
        .update_quantity(user.id, variant.id, 0)
        .await
        .expect("update");
    assert!(updated.is_none());
    assert!(app.services.cart.items(user.id).await.expect("items").is_empty());
    assert!(!app.services.cart.remove_item(user.id, variant.id).await.expect("remove"));
}

#[tokio::test]
async fn test_summary_prices_every_line() {
    let app = TestApp::new();
    let user = app.create_user("summary@example.com").await;
    let shoe = app.create_stocked_variant("Superstar", "SST-42", money(9_999), 10).await;
    let shirt = app.create_stocked_variant("Trefoil Tee", "TEE-M", money(3_000), 10).await;

    app.services
        .cart
        .add_item(&app.ctx(), add(user.id, shoe.id, 2))
        .await
        .expect("add shoe");
    app.services
        .cart
        .add_item(&app.ctx(), add(user.id, shirt.id, 1))
        .await
        .expect("add shirt");

    let summary = app.services.cart.summary(user.id).await.expect("summary");
    assert_eq!(summary.lines.len(), 2);
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.subtotal, money(22_998));
    assert!(summary.lines.iter().all(|l| l.available));

    let shoe_line = summary
        .lines
        .iter()
        .find(|l| l.variant_id == shoe.id)
        .expect("shoe line");
    assert_eq!(shoe_line.product_name, "Superstar");
    assert_eq!(shoe_line.line_total, money(19_998));
}

#[tokio::test]
async fn test_clear_empties_only_own_cart() {
    let app = TestApp::new();
    let alice = app.create_user("alice@example.com").await;
    let bob = app.create_user("bob@example.com").await;
    let variant = app.create_stocked_variant("NMD", "NMD-42", money(13_000), 10).await;

    app.services
        .cart
        .add_item(&app.ctx(), add(alice.id, variant.id, 1))
        .await
        .expect("alice adds");
    app.services
        .cart
        .add_item(&app.ctx(), add(bob.id, variant.id, 1))
        .await
        .expect("bob adds");

    assert_eq!(app.services.cart.clear(alice.id).await.expect("clear"), 1);
    assert!(app.services.cart.summary(alice.id).await.expect("summary").is_empty());
    assert_eq!(app.services.cart.items(bob.id).await.expect("items").len(), 1);
}

#[tokio::test]
async fn test_wishlist_add_is_idempotent() {
    let app = TestApp::new();
    let user = app.create_user("wish@example.com").await;
    let product = app.create_product("Spezial", money(10_000)).await;
    let req = AddWishlistItemRequest {
        user_id: user.id,
        product_id: product.id,
    };

    let first = app.services.wishlist.add(&app.ctx(), req.clone()).await.expect("add");
    let second = app.services.wishlist.add(&app.ctx(), req).await.expect("add again");
    assert_eq!(first.id, second.id);

    let list = app.services.wishlist.list(user.id).await.expect("list");
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].product.as_ref().map(|p| p.name.as_str()), Some("Spezial"));
}

#[tokio::test]
async fn test_move_wishlist_item_to_cart() {
    let app = TestApp::new();
    let user = app.create_user("move@example.com").await;
    let product = app.create_product("Forum", money(11_000)).await;
    let variant = app.create_variant(product.id, "FORUM-42", 4).await;
    let other = app.create_stocked_variant("Campus", "CAMPUS-42", money(10_000), 4).await;

    app.services
        .wishlist
        .add(
            &app.ctx(),
            AddWishlistItemRequest {
                user_id: user.id,
                product_id: product.id,
            },
        )
        .await
        .expect("wishlist");

    let err = app
        .services
        .wishlist
        .move_to_cart(&app.ctx(), user.id, product.id, other.id, 1)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    let item = app
        .services
        .wishlist
        .move_to_cart(&app.ctx(), user.id, product.id, variant.id, 2)
        .await
        .expect("move");
    assert_eq!(item.quantity, 2);
    assert!(app.services.wishlist.list(user.id).await.expect("list").is_empty());

    let err = app
        .services
        .wishlist
        .move_to_cart(&app.ctx(), user.id, product.id, variant.id, 1)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}
