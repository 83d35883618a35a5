//! Brand entity/DTO mapping and relation loading.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository};
use storefront_core::types::{Audit, FilterField, QuerySpec};
use storefront_entity::brand::Brand;
use storefront_entity::product::Product;
use storefront_entity::slug::slug_for;

use super::dto::{BrandResponse, CreateBrandRequest, UpdateBrandRequest};
use crate::crud::Expand;
use crate::product::ProductMapper;

/// Maps [`Brand`] to and from its DTOs.
#[derive(Debug, Clone, Default)]
pub struct BrandMapper;

impl Mapper for BrandMapper {
    type Entity = Brand;
    type Read = BrandResponse;
    type Create = CreateBrandRequest;
    type Update = UpdateBrandRequest;

    fn to_read(&self, brand: &Brand) -> BrandResponse {
        BrandResponse {
            id: brand.audit.id,
            name: brand.name.clone(),
            slug: brand.slug.clone(),
            description: brand.description.clone(),
            logo_url: brand.logo_url.clone(),
            is_active: brand.audit.is_active,
            created_at: brand.audit.created_at,
            products: None,
        }
    }

    fn from_create(&self, dto: CreateBrandRequest, created_by: Option<Uuid>) -> AppResult<Brand> {
        let slug = slug_for(dto.slug.as_deref().unwrap_or(&dto.name))?;
        Ok(Brand {
            audit: Audit::created_by(created_by),
            name: dto.name,
            slug,
            description: dto.description,
            logo_url: dto.logo_url,
        })
    }

    fn apply_update(&self, brand: &mut Brand, dto: UpdateBrandRequest) -> AppResult<()> {
        if let Some(name) = dto.name {
            brand.name = name;
        }
        if let Some(slug) = dto.slug {
            brand.slug = slug_for(&slug)?;
        }
        if let Some(description) = dto.description {
            brand.description = Some(description);
        }
        if let Some(logo_url) = dto.logo_url {
            brand.logo_url = Some(logo_url);
        }
        Ok(())
    }
}

/// Loads the `products` relation.
pub struct BrandExpander {
    products: Arc<dyn Repository<Product>>,
}

impl BrandExpander {
    /// Creates an expander reading from `products`.
    pub fn new(products: Arc<dyn Repository<Product>>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl Expand<BrandMapper> for BrandExpander {
    async fn expand(&self, read: &mut BrandResponse, brand: &Brand, includes: &[String]) -> AppResult<()> {
        if includes.iter().any(|i| i == "products") {
            let products = self
                .products
                .get_all(&QuerySpec::new().filter(FilterField::eq("brand_id", brand.audit.id)))
                .await?;
            read.products = Some(products.iter().map(|p| ProductMapper.to_read(p)).collect());
        }
        Ok(())
    }
}
