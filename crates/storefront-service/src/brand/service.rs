//! Brand catalog operations.

use std::sync::Arc;

use storefront_core::result::AppResult;
use storefront_core::traits::{Repository, Service};
use storefront_core::types::{FilterField, QuerySpec, SortField};
use storefront_entity::brand::Brand;
use storefront_entity::product::Product;

use super::dto::BrandResponse;
use super::mapper::{BrandExpander, BrandMapper};
use crate::crud::CrudService;

/// Manages brands.
#[derive(Clone)]
pub struct BrandService {
    /// Generic CRUD over brands, with `products` expansion.
    crud: CrudService<BrandMapper>,
}

impl BrandService {
    /// Creates a new brand service.
    pub fn new(brands: Arc<dyn Repository<Brand>>, products: Arc<dyn Repository<Product>>) -> Self {
        Self {
            crud: CrudService::new(brands, BrandMapper).with_expander(BrandExpander::new(products)),
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<BrandMapper> {
        &self.crud
    }

    /// Looks up a live brand by slug.
    pub async fn get_by_slug(&self, slug: &str, includes: &[String]) -> AppResult<Option<BrandResponse>> {
        let mut spec = QuerySpec::new().filter(FilterField::eq("slug", slug));
        spec.includes = includes.to_vec();
        self.crud.find(&spec).await
    }

    /// Active brands ordered by name.
    pub async fn list_active(&self) -> AppResult<Vec<BrandResponse>> {
        self.crud
            .get_all(
                &QuerySpec::new()
                    .filter(FilterField::eq("is_active", true))
                    .sort(SortField::asc("name")),
            )
            .await
    }
}

impl Service for BrandService {}
