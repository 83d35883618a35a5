//! Product reviews and ratings.

use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_core::error::ErrorKind;
use storefront_core::types::PageRequest;
use storefront_service::review::{CreateReviewRequest, UpdateReviewRequest};

use crate::helpers::{TestApp, money};

fn review(user_id: Uuid, product_id: Uuid, rating: i16) -> CreateReviewRequest {
    CreateReviewRequest {
        user_id,
        product_id,
        rating,
        title: Some("Solid pair".into()),
        comment: None,
    }
}

#[tokio::test]
async fn test_one_review_per_user_and_product() {
    let app = TestApp::new();
    let user = app.create_user("critic@example.com").await;
    let product = app.create_product("Samba Classic", money(10_000)).await;

    let created = app
        .services
        .reviews
        .create(&app.ctx(), review(user.id, product.id, 5))
        .await
        .expect("create");
    assert!(!created.is_approved);

    let err = app
        .services
        .reviews
        .create(&app.ctx(), review(user.id, product.id, 3))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn test_rating_out_of_range_is_invalid() {
    let app = TestApp::new();
    let user = app.create_user("range@example.com").await;
    let product = app.create_product("Busenitz", money(9_000)).await;

    for rating in [0, 6] {
        let err = app
            .services
            .reviews
            .create(&app.ctx(), review(user.id, product.id, rating))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
}

#[tokio::test]
async fn test_review_requires_existing_product() {
    let app = TestApp::new();
    let user = app.create_user("ghost@example.com").await;
    let err = app
        .services
        .reviews
        .create(&app.ctx(), review(user.id, Uuid::new_v4(), 4))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_rating_counts_only_approved_reviews() {
    let app = TestApp::new();
    let product = app.create_product("Adizero Adios", money(16_000)).await;
    let mut ids = Vec::new();
    for (email, rating) in [("a@example.com", 5), ("b@example.com", 4), ("c@example.com", 1)] {
        let user = app.create_user(email).await;
        let created = app
            .services
            .reviews
            .create(&app.ctx(), review(user.id, product.id, rating))
            .await
            .expect("create");
        ids.push(created.id);
    }

    let empty = app.services.reviews.product_rating(product.id).await.expect("rating");
    assert_eq!(empty.count, 0);
    assert_eq!(empty.average, Decimal::ZERO);

    for id in &ids[..2] {
        let approved = app
            .services
            .reviews
            .approve(*id)
            .await
            .expect("approve")
            .expect("review");
        assert!(approved.is_approved);
    }

    let rating = app.services.reviews.product_rating(product.id).await.expect("rating");
    assert_eq!(rating.count, 2);
    assert_eq!(rating.average, money(450));

    let listed = app
        .services
        .reviews
        .list_for_product(product.id, &PageRequest::new(1, 10))
        .await
        .expect("list");
    assert_eq!(listed.total_items, 2);
}

#[tokio::test]
async fn test_edit_returns_review_to_moderation() {
    let app = TestApp::new();
    let user = app.create_user("editor@example.com").await;
    let product = app.create_product("Handball Spezial", money(10_000)).await;
    let created = app
        .services
        .reviews
        .create(&app.ctx(), review(user.id, product.id, 3))
        .await
        .expect("create");
    app.services.reviews.approve(created.id).await.expect("approve");

    let edited = app
        .services
        .reviews
        .update(
            created.id,
            UpdateReviewRequest {
                rating: Some(4),
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("review");
    assert_eq!(edited.rating, 4);
    assert!(!edited.is_approved);
    assert_eq!(edited.title.as_deref(), Some("Solid pair"));

    assert!(app.services.reviews.approve(Uuid::new_v4()).await.expect("approve").is_none());
}
