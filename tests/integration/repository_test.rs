//! Generic repository and CRUD behaviour exercised through the services.

use std::collections::HashSet;

use storefront_core::traits::Repository;
use storefront_core::types::{FilterField, PageRequest, QuerySpec, SortField};
use storefront_service::product::{ProductSearch, UpdateProductRequest};

use crate::helpers::{TestApp, money};

#[tokio::test]
async fn test_created_identities_are_unique() {
    let app = TestApp::new();
    let mut ids = HashSet::new();
    for i in 0..5 {
        let product = app.create_product(&format!("Runner {i}"), money(9_000)).await;
        assert!(!product.id.is_nil());
        ids.insert(product.id);
    }
    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn test_soft_deleted_rows_are_hidden_by_default() {
    let app = TestApp::new();
    let kept = app.create_product("Gazelle", money(10_000)).await;
    let gone = app.create_product("Campus", money(11_000)).await;

    assert!(app.services.products.crud().delete(gone.id).await.expect("delete"));
    assert!(!app.services.products.crud().delete(gone.id).await.expect("second delete"));

    let all = app.services.products.crud().get_all(&QuerySpec::new()).await.expect("list");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, kept.id);
    assert!(app.services.products.crud().get_by_id(gone.id, &[]).await.expect("get").is_none());

    let deleted = app
        .repos
        .products
        .get_by_id_with_deleted(gone.id)
        .await
        .expect("get with deleted")
        .expect("row still stored");
    assert!(deleted.audit.is_deleted);

    let visible = app
        .repos
        .products
        .get_all(&QuerySpec::new().with_deleted())
        .await
        .expect("list with deleted");
    assert_eq!(visible.len(), 2);
}

#[tokio::test]
async fn test_hard_delete_removes_the_row() {
    let app = TestApp::new();
    let product = app.create_product("Handball Spezial", money(10_000)).await;
    assert!(app.services.products.crud().delete(product.id).await.expect("delete"));
    assert!(app.services.products.crud().purge(product.id).await.expect("purge"));
    assert!(
        app.repos
            .products
            .get_by_id_with_deleted(product.id)
            .await
            .expect("get")
            .is_none()
    );
}

#[tokio::test]
async fn test_paging_reports_totals_past_the_last_page() {
    let app = TestApp::new();
    for i in 1..=7 {
        app.create_product(&format!("Product {i}"), money(5_000)).await;
    }
    let search = ProductSearch::default();

    let last = app
        .services
        .products
        .search(&search, &PageRequest::new(3, 3))
        .await
        .expect("page 3");
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].name, "Product 7");
    assert_eq!(last.total_items, 7);
    assert_eq!(last.total_pages, 3);
    assert!(!last.has_next);
    assert!(last.has_previous);

    let beyond = app
        .services
        .products
        .search(&search, &PageRequest::new(4, 3))
        .await
        .expect("page 4");
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_items, 7);
    assert_eq!(beyond.total_pages, 3);
}

#[tokio::test]
async fn test_paging_of_an_empty_set() {
    let app = TestApp::new();
    let page = app
        .services
        .products
        .search(&ProductSearch::default(), &PageRequest::new(1, 10))
        .await
        .expect("page");
    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 0);
    assert_eq!(page.total_pages, 0);
    assert!(!page.has_next);
}

#[tokio::test]
async fn test_partial_update_leaves_other_fields() {
    let app = TestApp::new();
    let product = app.create_product("Forum Low", money(11_000)).await;

    let updated = app
        .services
        .products
        .update(
            product.id,
            UpdateProductRequest {
                description: Some("Basketball heritage".into()),
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("present");

    assert_eq!(updated.description.as_deref(), Some("Basketball heritage"));
    assert_eq!(updated.name, product.name);
    assert_eq!(updated.slug, product.slug);
    assert_eq!(updated.base_price, product.base_price);
    assert_eq!(updated.created_at, product.created_at);
    assert!(updated.updated_at >= product.updated_at);
}

#[tokio::test]
async fn test_unknown_filter_field_is_rejected() {
    let app = TestApp::new();
    app.create_product("Superstar", money(10_000)).await;
    let err = app
        .services
        .products
        .crud()
        .get_all(&QuerySpec::new().filter(FilterField::eq("colour; DROP TABLE products", "x")))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown field"));
}

#[tokio::test]
async fn test_unknown_include_is_rejected() {
    let app = TestApp::new();
    let err = app
        .services
        .products
        .crud()
        .get_all(&QuerySpec::new().include("warehouses"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("warehouses"));
}

#[tokio::test]
async fn test_count_and_exists_honour_filters() {
    let app = TestApp::new();
    app.create_product("Stan Smith", money(10_000)).await;
    app.create_product("Continental 80", money(9_000)).await;

    let cheap = QuerySpec::new().filter(FilterField::lte("base_price", money(9_500)));
    assert_eq!(app.services.products.crud().count(&cheap).await.expect("count"), 1);
    assert!(app.services.products.crud().exists(&cheap).await.expect("exists"));

    let sorted = app
        .services
        .products
        .crud()
        .get_all(&QuerySpec::new().sort(SortField::desc("base_price")))
        .await
        .expect("sorted");
    assert_eq!(sorted[0].name, "Stan Smith");
}
