//! Brands, categories, products and variants.

use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_core::error::ErrorKind;
use storefront_core::types::PageRequest;
use storefront_service::brand::CreateBrandRequest;
use storefront_service::category::{CreateCategoryRequest, UpdateCategoryRequest};
use storefront_service::product::{CreateProductRequest, ProductSearch, UpdateProductRequest};

use crate::helpers::{TestApp, money};

fn category(name: &str, parent_id: Option<Uuid>) -> CreateCategoryRequest {
    CreateCategoryRequest {
        name: name.into(),
        slug: None,
        description: None,
        parent_id,
    }
}

fn product(name: &str, price: Decimal, brand_id: Option<Uuid>, category_id: Option<Uuid>) -> CreateProductRequest {
    CreateProductRequest {
        name: name.into(),
        slug: None,
        description: None,
        brand_id,
        category_id,
        base_price: price,
    }
}

#[tokio::test]
async fn test_product_search_filters() {
    let app = TestApp::new();
    let brand = app
        .services
        .brands
        .crud()
        .create(
            &app.ctx(),
            CreateBrandRequest {
                name: "Originals".into(),
                slug: None,
                description: None,
                logo_url: None,
            },
        )
        .await
        .expect("brand");
    let shoes = app
        .services
        .categories
        .create(&app.ctx(), category("Shoes", None))
        .await
        .expect("category");

    for (name, cents, branded) in [
        ("Samba OG", 10_000, true),
        ("Samba Decon", 15_000, true),
        ("Gazelle", 11_000, true),
        ("Runfalcon", 6_000, false),
    ] {
        let brand_id = branded.then_some(brand.id);
        app.services
            .products
            .create(&app.ctx(), product(name, money(cents), brand_id, Some(shoes.id)))
            .await
            .expect("product");
    }
    let page = PageRequest::new(1, 20);

    let by_name = app
        .services
        .products
        .search(
            &ProductSearch {
                name: Some("samba".into()),
                ..Default::default()
            },
            &page,
        )
        .await
        .expect("search");
    let names: Vec<&str> = by_name.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Samba Decon", "Samba OG"]);

    let by_brand = app
        .services
        .products
        .search(
            &ProductSearch {
                brand_id: Some(brand.id),
                max_price: Some(money(11_000)),
                sort: Some("base_price:desc".into()),
                ..Default::default()
            },
            &page,
        )
        .await
        .expect("search");
    let names: Vec<&str> = by_brand.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Gazelle", "Samba OG"]);

    let by_category = app
        .services
        .products
        .search(
            &ProductSearch {
                category_id: Some(shoes.id),
                min_price: Some(money(10_000)),
                ..Default::default()
            },
            &page,
        )
        .await
        .expect("search");
    assert_eq!(by_category.total_items, 3);
}

#[tokio::test]
async fn test_inactive_products_are_hidden_from_search() {
    let app = TestApp::new();
    let active = app.create_product("Forum Mid", money(12_000)).await;
    let retired = app.create_product("ZX 8000", money(13_000)).await;
    app.services
        .products
        .crud()
        .set_active_status(retired.id, false)
        .await
        .expect("deactivate");

    let visible = app
        .services
        .products
        .search(&ProductSearch::default(), &PageRequest::new(1, 10))
        .await
        .expect("search");
    assert_eq!(visible.items.len(), 1);
    assert_eq!(visible.items[0].id, active.id);

    let everything = app
        .services
        .products
        .search(
            &ProductSearch {
                include_inactive: true,
                ..Default::default()
            },
            &PageRequest::new(1, 10),
        )
        .await
        .expect("search");
    assert_eq!(everything.total_items, 2);
}

#[tokio::test]
async fn test_product_references_must_exist() {
    let app = TestApp::new();
    let err = app
        .services
        .products
        .create(&app.ctx(), product("Orphan", money(5_000), Some(Uuid::new_v4()), None))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    let err = app
        .services
        .products
        .create(&app.ctx(), product("Broke", Decimal::from(-1), None, None))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}

#[tokio::test]
async fn test_duplicate_slug_conflicts() {
    let app = TestApp::new();
    app.create_product("Stan Smith", money(10_000)).await;
    let err = app
        .services
        .products
        .create(&app.ctx(), product("Stan  Smith", money(10_000), None, None))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));
}

#[tokio::test]
async fn test_names_without_slug_characters_are_rejected() {
    let app = TestApp::new();
    for name in ["!!!", "???"] {
        let err = app
            .services
            .products
            .create(&app.ctx(), product(name, money(5_000), None, None))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }
    let err = app
        .services
        .brands
        .crud()
        .create(
            &app.ctx(),
            CreateBrandRequest {
                name: "Ü".into(),
                slug: None,
                description: None,
                logo_url: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    let gazelle = app.create_product("Gazelle", money(10_000)).await;
    let err = app
        .services
        .products
        .update(
            gazelle.id,
            UpdateProductRequest {
                slug: Some("---".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
    let unchanged = app.services.products.get_by_slug("gazelle", &[]).await.expect("lookup");
    assert!(unchanged.is_some());
}

#[tokio::test]
async fn test_product_by_slug_with_variants() {
    let app = TestApp::new();
    let product = app.create_product("Ultraboost Light", money(19_000)).await;
    app.create_variant(product.id, "ubl-44", 3).await;
    app.create_variant(product.id, "ubl-42", 7).await;

    let found = app
        .services
        .products
        .get_by_slug("ultraboost-light", &["variants".to_string()])
        .await
        .expect("lookup")
        .expect("product");
    let variants = found.variants.expect("variants");
    let skus: Vec<&str> = variants.iter().map(|v| v.sku.as_str()).collect();
    assert_eq!(skus, vec!["UBL-42", "UBL-44"]);
    assert!(variants.iter().all(|v| v.price == money(19_000)));
    assert!(found.brand.is_none());
}

#[tokio::test]
async fn test_brand_lookup_includes_products() {
    let app = TestApp::new();
    let brand = app
        .services
        .brands
        .crud()
        .create(
            &app.ctx(),
            CreateBrandRequest {
                name: "Terrex".into(),
                slug: None,
                description: Some("Outdoor".into()),
                logo_url: None,
            },
        )
        .await
        .expect("brand");
    app.services
        .products
        .create(&app.ctx(), product("Terrex Swift", money(14_000), Some(brand.id), None))
        .await
        .expect("product");

    let plain = app
        .services
        .brands
        .get_by_slug("terrex", &[])
        .await
        .expect("lookup")
        .expect("brand");
    assert!(plain.products.is_none());

    let loaded = app
        .services
        .brands
        .get_by_slug("terrex", &["products".to_string()])
        .await
        .expect("lookup")
        .expect("brand");
    assert_eq!(loaded.products.map(|p| p.len()), Some(1));
}

#[tokio::test]
async fn test_category_tree_and_cycles() {
    let app = TestApp::new();
    let root = app
        .services
        .categories
        .create(&app.ctx(), category("Men", None))
        .await
        .expect("root");
    let child = app
        .services
        .categories
        .create(&app.ctx(), category("Running", Some(root.id)))
        .await
        .expect("child");
    let grandchild = app
        .services
        .categories
        .create(&app.ctx(), category("Trail", Some(child.id)))
        .await
        .expect("grandchild");

    let roots = app.services.categories.tree(None).await.expect("roots");
    assert_eq!(roots.len(), 1);
    let subcategories = roots[0].subcategories.as_ref().expect("subcategories");
    assert_eq!(subcategories.len(), 1);
    assert_eq!(subcategories[0].id, child.id);

    let err = app
        .services
        .categories
        .update(
            root.id,
            UpdateCategoryRequest {
                parent_id: Some(grandchild.id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));

    let err = app
        .services
        .categories
        .update(
            child.id,
            UpdateCategoryRequest {
                parent_id: Some(child.id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));

    let err = app
        .services
        .categories
        .create(&app.ctx(), category("Lost", Some(Uuid::new_v4())))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_category_moves_back_to_root() {
    let app = TestApp::new();
    let women = app
        .services
        .categories
        .create(&app.ctx(), category("Women", None))
        .await
        .expect("root");
    let yoga = app
        .services
        .categories
        .create(&app.ctx(), category("Yoga", Some(women.id)))
        .await
        .expect("child");

    let err = app
        .services
        .categories
        .update(
            yoga.id,
            UpdateCategoryRequest {
                parent_id: Some(women.id),
                clear_parent: true,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    let moved = app
        .services
        .categories
        .update(
            yoga.id,
            UpdateCategoryRequest {
                clear_parent: true,
                ..Default::default()
            },
        )
        .await
        .expect("update")
        .expect("category");
    assert_eq!(moved.parent_id, None);

    let roots = app.services.categories.tree(None).await.expect("roots");
    let names: Vec<&str> = roots.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Women", "Yoga"]);
}

#[tokio::test]
async fn test_variant_stock_adjustment() {
    let app = TestApp::new();
    let variant = app.create_stocked_variant("Copa Pure", "COPA-P-43", money(12_000), 5).await;

    let raised = app.services.variants.adjust_stock(variant.id, 10).await.expect("raise");
    assert_eq!(raised.stock_quantity, 15);
    let lowered = app.services.variants.adjust_stock(variant.id, -15).await.expect("lower");
    assert_eq!(lowered.stock_quantity, 0);

    let err = app.services.variants.adjust_stock(variant.id, -1).await.unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));

    let err = app.services.variants.reserve(variant.id, 1).await.unwrap_err();
    assert!(err.is(ErrorKind::BusinessRule));
    let err = app.services.variants.reserve(variant.id, 0).await.unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}

#[tokio::test]
async fn test_variant_sku_lookup_is_case_insensitive() {
    let app = TestApp::new();
    let product = app.create_product("Superstar XLG", money(11_000)).await;
    let variant = app.create_variant(product.id, "sst-xlg-40", 2).await;
    assert_eq!(variant.sku, "SST-XLG-40");

    let found = app
        .services
        .variants
        .get_by_sku(" sst-xlg-40 ")
        .await
        .expect("lookup")
        .expect("variant");
    assert_eq!(found.id, variant.id);

    let listed = app.services.variants.list_for_product(product.id).await.expect("list");
    assert_eq!(listed.len(), 1);
}
