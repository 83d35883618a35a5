//! Address book and default address handling.

use uuid::Uuid;

use storefront_core::error::ErrorKind;
use storefront_service::address::{CreateAddressRequest, UpdateAddressRequest};

use crate::helpers::TestApp;

async fn defaults(app: &TestApp, user_id: Uuid) -> Vec<Uuid> {
    app.services
        .addresses
        .list_for_user(user_id)
        .await
        .expect("list")
        .into_iter()
        .filter(|a| a.is_default)
        .map(|a| a.id)
        .collect()
}

#[tokio::test]
async fn test_first_address_becomes_default() {
    let app = TestApp::new();
    let user = app.create_user("home@example.com").await;

    let first = app.create_address(user.id, "Herzogenaurach").await;
    let second = app.create_address(user.id, "Nuremberg").await;

    assert!(first.is_default);
    assert!(!second.is_default);
    assert_eq!(first.country, "DE");
    assert_eq!(defaults(&app, user.id).await, vec![first.id]);

    let default = app
        .services
        .addresses
        .default_for(user.id)
        .await
        .expect("default")
        .expect("present");
    assert_eq!(default.audit.id, first.id);
}

#[tokio::test]
async fn test_new_default_replaces_old() {
    let app = TestApp::new();
    let user = app.create_user("replace@example.com").await;
    let first = app.create_address(user.id, "Berlin").await;

    let explicit = app
        .services
        .addresses
        .create(
            &app.ctx(),
            CreateAddressRequest {
                user_id: user.id,
                full_name: "Test Runner".into(),
                phone: None,
                line1: "2 Stripe Street".into(),
                line2: None,
                city: "Hamburg".into(),
                state: None,
                postal_code: "20095".into(),
                country: "DE".into(),
                is_default: true,
            },
        )
        .await
        .expect("create");

    assert!(explicit.is_default);
    assert_eq!(defaults(&app, user.id).await, vec![explicit.id]);

    let listed = app.services.addresses.list_for_user(user.id).await.expect("list");
    assert_eq!(listed[0].id, explicit.id);
    assert_eq!(listed[1].id, first.id);
}

#[tokio::test]
async fn test_set_default_switches_the_flag() {
    let app = TestApp::new();
    let user = app.create_user("switch@example.com").await;
    let other = app.create_user("other@example.com").await;
    let first = app.create_address(user.id, "Munich").await;
    let second = app.create_address(user.id, "Cologne").await;

    let updated = app
        .services
        .addresses
        .set_default(user.id, second.id)
        .await
        .expect("set default")
        .expect("address");
    assert!(updated.is_default);
    assert_eq!(defaults(&app, user.id).await, vec![second.id]);

    assert!(
        app.services
            .addresses
            .set_default(other.id, first.id)
            .await
            .expect("foreign address")
            .is_none()
    );
}

#[tokio::test]
async fn test_deleting_default_promotes_another() {
    let app = TestApp::new();
    let user = app.create_user("promote@example.com").await;
    let first = app.create_address(user.id, "Leipzig").await;
    app.create_address(user.id, "Dresden").await;
    app.create_address(user.id, "Bremen").await;

    assert!(app.services.addresses.delete(first.id).await.expect("delete"));

    let remaining = app.services.addresses.list_for_user(user.id).await.expect("list");
    assert_eq!(remaining.len(), 2);
    let promoted = defaults(&app, user.id).await;
    assert_eq!(promoted.len(), 1);
    assert_ne!(promoted[0], first.id);

    assert!(!app.services.addresses.delete(first.id).await.expect("delete again"));
}

#[tokio::test]
async fn test_deleting_last_address_leaves_none() {
    let app = TestApp::new();
    let user = app.create_user("last@example.com").await;
    let only = app.create_address(user.id, "Stuttgart").await;

    assert!(app.services.addresses.delete(only.id).await.expect("delete"));
    assert!(app.services.addresses.default_for(user.id).await.expect("default").is_none());
}

#[tokio::test]
async fn test_address_update_and_validation() {
    let app = TestApp::new();
    let user = app.create_user("edit@example.com").await;
    let address = app.create_address(user.id, "Bonn").await;

    let updated = app
        .services
        .addresses
        .update(
            address.id,
            UpdateAddressRequest {
                city: Some("Frankfurt".into()),
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("address");
    assert_eq!(updated.city, "Frankfurt");
    assert_eq!(updated.postal_code, address.postal_code);
    assert!(updated.is_default);

    let err = app
        .services
        .addresses
        .create(
            &app.ctx(),
            CreateAddressRequest {
                user_id: Uuid::new_v4(),
                full_name: "Nobody".into(),
                phone: None,
                line1: "Nowhere".into(),
                line2: None,
                city: "Nowhere".into(),
                state: None,
                postal_code: "00000".into(),
                country: "DE".into(),
                is_default: false,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}
