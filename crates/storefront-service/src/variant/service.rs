//! Variant operations and stock movements.
//!
//! Stock is only ever changed through [`VariantService::adjust_stock`],
//! [`VariantService::reserve`] and [`VariantService::release`]; each movement
//! is one repository write and the level never goes below zero.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository, Service};
use storefront_core::types::{FilterField, QuerySpec, SortField};
use storefront_entity::product::{Product, ProductVariant};

use super::dto::{CreateVariantRequest, UpdateVariantRequest, VariantResponse};
use super::mapper::VariantMapper;
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Manages variants and their stock levels.
#[derive(Clone)]
pub struct VariantService {
    /// Generic CRUD over variants.
    crud: CrudService<VariantMapper>,
    products: Arc<dyn Repository<Product>>,
}

impl VariantService {
    /// Creates a new variant service.
    pub fn new(variants: Arc<dyn Repository<ProductVariant>>, products: Arc<dyn Repository<Product>>) -> Self {
        Self {
            crud: CrudService::new(variants, VariantMapper),
            products,
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<VariantMapper> {
        &self.crud
    }

    /// Creates a variant of a live product. The price defaults to the
    /// product's base price.
    pub async fn create(&self, ctx: &RequestContext, req: CreateVariantRequest) -> AppResult<VariantResponse> {
        let product = self
            .products
            .get_by_id(req.product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {} not found", req.product_id)))?;
        let explicit_price = req.price.is_some();
        let mut variant = self.crud.build(ctx, req)?;
        if !explicit_price {
            variant.price = product.base_price;
        }
        self.crud.insert(variant).await
    }

    /// Applies a partial update.
    pub async fn update(&self, id: Uuid, req: UpdateVariantRequest) -> AppResult<Option<VariantResponse>> {
        self.crud.update(id, req).await
    }

    /// Live variants of a product ordered by SKU.
    pub async fn list_for_product(&self, product_id: Uuid) -> AppResult<Vec<VariantResponse>> {
        self.crud
            .get_all(
                &QuerySpec::new()
                    .filter(FilterField::eq("product_id", product_id))
                    .sort(SortField::asc("sku")),
            )
            .await
    }

    /// Looks up a live variant by SKU, case-insensitively.
    pub async fn get_by_sku(&self, sku: &str) -> AppResult<Option<VariantResponse>> {
        self.crud
            .find(&QuerySpec::new().filter(FilterField::eq("sku", sku.trim().to_uppercase())))
            .await
    }

    /// Moves the stock level by `delta`. The result may not be negative.
    pub async fn adjust_stock(&self, id: Uuid, delta: i32) -> AppResult<VariantResponse> {
        let mut variant = self.require(id).await?;
        let next = variant
            .stock_quantity
            .checked_add(delta)
            .filter(|n| *n >= 0)
            .ok_or_else(|| {
                warn!(variant_id = %id, stock = variant.stock_quantity, delta, "Stock adjustment rejected");
                AppError::business_rule(format!(
                    "Stock of {} cannot go below zero (on hand {}, change {delta})",
                    variant.sku, variant.stock_quantity
                ))
            })?;
        variant.stock_quantity = next;
        let variant = self.crud.repository().update(variant).await?;
        info!(variant_id = %id, stock = next, delta, "Stock adjusted");
        Ok(self.crud.mapper().to_read(&variant))
    }

    /// Takes `quantity` units out of stock for an order.
    pub async fn reserve(&self, id: Uuid, quantity: i32) -> AppResult<ProductVariant> {
        if quantity <= 0 {
            return Err(AppError::validation("Quantity must be at least 1"));
        }
        let mut variant = self.require(id).await?;
        if !variant.has_stock(quantity) {
            warn!(variant_id = %id, requested = quantity, available = variant.stock_quantity, "Insufficient stock");
            return Err(AppError::business_rule(format!(
                "Insufficient stock for {}: requested {quantity}, available {}",
                variant.sku, variant.stock_quantity
            )));
        }
        variant.stock_quantity -= quantity;
        let variant = self.crud.repository().update(variant).await?;
        info!(variant_id = %id, quantity, remaining = variant.stock_quantity, "Stock reserved");
        Ok(variant)
    }

    /// Puts `quantity` units back, e.g. when an order is cancelled.
    ///
    /// Variants deleted in the meantime are skipped.
    pub async fn release(&self, id: Uuid, quantity: i32) -> AppResult<()> {
        let Some(mut variant) = self.crud.repository().get_by_id(id).await? else {
            warn!(variant_id = %id, quantity, "Cannot release stock of a missing variant");
            return Ok(());
        };
        variant.stock_quantity = variant.stock_quantity.saturating_add(quantity);
        self.crud.repository().update(variant).await?;
        info!(variant_id = %id, quantity, "Stock released");
        Ok(())
    }

    async fn require(&self, id: Uuid) -> AppResult<ProductVariant> {
        self.crud
            .repository()
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product variant {id} not found")))
    }
}

impl Service for VariantService {}
