//! Catalog operations on products.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Repository, Service};
use storefront_core::types::{FilterField, PageRequest, PageResponse, QuerySpec};
use storefront_entity::brand::Brand;
use storefront_entity::category::Category;
use storefront_entity::product::{Product, ProductVariant};
use storefront_entity::review::Review;

use super::dto::{CreateProductRequest, ProductResponse, ProductSearch, UpdateProductRequest};
use super::mapper::{ProductExpander, ProductMapper};
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Manages catalog products.
#[derive(Clone)]
pub struct ProductService {
    /// Generic CRUD over products.
    crud: CrudService<ProductMapper>,
    brands: Arc<dyn Repository<Brand>>,
    categories: Arc<dyn Repository<Category>>,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(
        products: Arc<dyn Repository<Product>>,
        variants: Arc<dyn Repository<ProductVariant>>,
        brands: Arc<dyn Repository<Brand>>,
        categories: Arc<dyn Repository<Category>>,
        reviews: Arc<dyn Repository<Review>>,
    ) -> Self {
        let expander = ProductExpander::new(
            variants,
            Arc::clone(&brands),
            Arc::clone(&categories),
            reviews,
        );
        Self {
            crud: CrudService::new(products, ProductMapper).with_expander(expander),
            brands,
            categories,
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<ProductMapper> {
        &self.crud
    }

    /// Creates a product. Referenced brand and category must exist.
    pub async fn create(&self, ctx: &RequestContext, req: CreateProductRequest) -> AppResult<ProductResponse> {
        self.check_references(req.brand_id, req.category_id).await?;
        let product = self.crud.create(ctx, req).await?;
        info!(product_id = %product.id, slug = %product.slug, "Product created");
        Ok(product)
    }

    /// Applies a partial update. Referenced brand and category must exist.
    pub async fn update(&self, id: Uuid, req: UpdateProductRequest) -> AppResult<Option<ProductResponse>> {
        self.check_references(req.brand_id, req.category_id).await?;
        self.crud.update(id, req).await
    }

    /// Paged catalog search.
    pub async fn search(&self, search: &ProductSearch, page: &PageRequest) -> AppResult<PageResponse<ProductResponse>> {
        let spec = search.to_query()?;
        self.crud.get_paged(page, &spec).await
    }

    /// Looks up a live product by slug.
    pub async fn get_by_slug(&self, slug: &str, includes: &[String]) -> AppResult<Option<ProductResponse>> {
        let mut spec = QuerySpec::new().filter(FilterField::eq("slug", slug));
        for include in includes {
            spec = spec.include(include.clone());
        }
        self.crud.find(&spec).await
    }

    async fn check_references(&self, brand_id: Option<Uuid>, category_id: Option<Uuid>) -> AppResult<()> {
        if let Some(brand_id) = brand_id {
            if self.brands.get_by_id(brand_id).await?.is_none() {
                return Err(AppError::not_found(format!("Brand {brand_id} not found")));
            }
        }
        if let Some(category_id) = category_id {
            if self.categories.get_by_id(category_id).await?.is_none() {
                return Err(AppError::not_found(format!("Category {category_id} not found")));
            }
        }
        Ok(())
    }
}

impl Service for ProductService {}
