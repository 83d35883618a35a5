//! Product entity/DTO mapping and relation loading.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository};
use storefront_core::types::{Audit, FilterField, QuerySpec, SortField};
use storefront_entity::brand::Brand;
use storefront_entity::category::Category;
use storefront_entity::product::{Product, ProductVariant};
use storefront_entity::review::Review;
use storefront_entity::slug::slug_for;

use super::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::brand::BrandMapper;
use crate::category::CategoryMapper;
use crate::crud::Expand;
use crate::review::ReviewMapper;
use crate::variant::VariantMapper;

/// Maps [`Product`] to and from its DTOs.
#[derive(Debug, Clone, Default)]
pub struct ProductMapper;

impl Mapper for ProductMapper {
    type Entity = Product;
    type Read = ProductResponse;
    type Create = CreateProductRequest;
    type Update = UpdateProductRequest;

    fn to_read(&self, product: &Product) -> ProductResponse {
        ProductResponse {
            id: product.audit.id,
            name: product.name.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            brand_id: product.brand_id,
            category_id: product.category_id,
            base_price: product.base_price,
            is_active: product.audit.is_active,
            created_at: product.audit.created_at,
            updated_at: product.audit.updated_at,
            variants: None,
            brand: None,
            category: None,
            reviews: None,
        }
    }

    fn from_create(&self, dto: CreateProductRequest, created_by: Option<Uuid>) -> AppResult<Product> {
        let slug = slug_for(dto.slug.as_deref().unwrap_or(&dto.name))?;
        Ok(Product {
            audit: Audit::created_by(created_by),
            name: dto.name,
            slug,
            description: dto.description,
            brand_id: dto.brand_id,
            category_id: dto.category_id,
            base_price: dto.base_price.round_dp(2),
        })
    }

    fn apply_update(&self, product: &mut Product, dto: UpdateProductRequest) -> AppResult<()> {
        if let Some(name) = dto.name {
            product.name = name;
        }
        if let Some(slug) = dto.slug {
            product.slug = slug_for(&slug)?;
        }
        if let Some(description) = dto.description {
            product.description = Some(description);
        }
        if let Some(brand_id) = dto.brand_id {
            product.brand_id = Some(brand_id);
        }
        if let Some(category_id) = dto.category_id {
            product.category_id = Some(category_id);
        }
        if let Some(base_price) = dto.base_price {
            product.base_price = base_price.round_dp(2);
        }
        Ok(())
    }
}

/// Loads `variants`, `brand`, `category` and `reviews`.
pub struct ProductExpander {
    variants: Arc<dyn Repository<ProductVariant>>,
    brands: Arc<dyn Repository<Brand>>,
    categories: Arc<dyn Repository<Category>>,
    reviews: Arc<dyn Repository<Review>>,
}

impl ProductExpander {
    /// Creates an expander over the related repositories.
    pub fn new(
        variants: Arc<dyn Repository<ProductVariant>>,
        brands: Arc<dyn Repository<Brand>>,
        categories: Arc<dyn Repository<Category>>,
        reviews: Arc<dyn Repository<Review>>,
    ) -> Self {
        Self {
            variants,
            brands,
            categories,
            reviews,
        }
    }
}

#[async_trait]
impl Expand<ProductMapper> for ProductExpander {
    async fn expand(
        &self,
        read: &mut ProductResponse,
        product: &Product,
        includes: &[String],
    ) -> AppResult<()> {
        for include in includes {
            match include.as_str() {
                "variants" => {
                    let variants = self
                        .variants
                        .get_all(
                            &QuerySpec::new()
                                .filter(FilterField::eq("product_id", product.audit.id))
                                .sort(SortField::asc("sku")),
                        )
                        .await?;
                    read.variants = Some(variants.iter().map(|v| VariantMapper.to_read(v)).collect());
                }
                "brand" => {
                    if let Some(brand_id) = product.brand_id {
                        let brand = self.brands.get_by_id(brand_id).await?;
                        read.brand = brand.map(|b| BrandMapper.to_read(&b));
                    }
                }
                "category" => {
                    if let Some(category_id) = product.category_id {
                        let category = self.categories.get_by_id(category_id).await?;
                        read.category = category.map(|c| CategoryMapper.to_read(&c));
                    }
                }
                "reviews" => {
                    let reviews = self
                        .reviews
                        .get_all(
                            &QuerySpec::new()
                                .filter(FilterField::eq("product_id", product.audit.id))
                                .filter(FilterField::eq("is_approved", true))
                                .sort(SortField::desc("created_at")),
                        )
                        .await?;
                    read.reviews = Some(reviews.iter().map(|r| ReviewMapper.to_read(r)).collect());
                }
                _ => {}
            }
        }
        Ok(())
    }
}
