//! Cart operations.
//!
//! A user's cart is the set of their live [`CartItem`] rows. Adding a variant
//! that is already in the cart raises the quantity of the existing row.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use storefront_core::config::StoreConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository, Service};
use storefront_core::types::{FilterField, QuerySpec, SortField};
use storefront_entity::cart::CartItem;
use storefront_entity::money::line_total;
use storefront_entity::product::{Product, ProductVariant};

use super::dto::{AddCartItemRequest, CartItemResponse, CartLine, CartSummary};
use super::mapper::CartItemMapper;
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Manages shopping carts.
#[derive(Clone)]
pub struct CartService {
    /// Generic CRUD over cart rows.
    crud: CrudService<CartItemMapper>,
    variants: Arc<dyn Repository<ProductVariant>>,
    products: Arc<dyn Repository<Product>>,
    store: StoreConfig,
}

impl CartService {
    /// Creates a new cart service.
    pub fn new(
        cart_items: Arc<dyn Repository<CartItem>>,
        variants: Arc<dyn Repository<ProductVariant>>,
        products: Arc<dyn Repository<Product>>,
        store: StoreConfig,
    ) -> Self {
        Self {
            crud: CrudService::new(cart_items, CartItemMapper),
            variants,
            products,
            store,
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<CartItemMapper> {
        &self.crud
    }

    /// Adds `quantity` units of a variant.
    ///
    /// An existing line for the same variant absorbs the quantity. The
    /// resulting quantity is capped at the per-item maximum and must be
    /// covered by stock.
    pub async fn add_item(&self, ctx: &RequestContext, req: AddCartItemRequest) -> AppResult<CartItemResponse> {
        req.validate()?;
        let variant = self.purchasable_variant(req.variant_id).await?;
        let existing = self.find_line(req.user_id, req.variant_id).await?;

        let current = existing.as_ref().map_or(0, |item| item.quantity);
        let quantity = current
            .saturating_add(req.quantity)
            .min(self.store.max_quantity_per_item);
        self.check_stock(&variant, quantity)?;

        let item = match existing {
            Some(mut item) => {
                item.quantity = quantity;
                self.crud.repository().update(item).await?
            }
            None => {
                let item = self.crud.mapper().from_create(
                    AddCartItemRequest { quantity, ..req },
                    ctx.user_id,
                )?;
                self.crud.repository().add(item).await?
            }
        };
        info!(user_id = %item.user_id, variant_id = %item.variant_id, quantity, "Cart item added");
        Ok(self.crud.mapper().to_read(&item))
    }

    /// Sets the quantity of a line. Zero removes it.
    ///
    /// Returns `None` when the variant is not in the cart or was removed.
    pub async fn update_quantity(&self, user_id: Uuid, variant_id: Uuid, quantity: i32) -> AppResult<Option<CartItemResponse>> {
        if quantity < 0 {
            return Err(AppError::validation("Quantity must not be negative"));
        }
        let Some(mut item) = self.find_line(user_id, variant_id).await? else {
            return Ok(None);
        };
        if quantity == 0 {
            self.crud.repository().hard_delete(item.audit.id).await?;
            info!(user_id = %user_id, variant_id = %variant_id, "Cart item removed");
            return Ok(None);
        }
        if quantity > self.store.max_quantity_per_item {
            return Err(AppError::business_rule(format!(
                "At most {} units of one item can be ordered",
                self.store.max_quantity_per_item
            )));
        }
        let variant = self.purchasable_variant(variant_id).await?;
        self.check_stock(&variant, quantity)?;
        item.quantity = quantity;
        let item = self.crud.repository().update(item).await?;
        info!(user_id = %user_id, variant_id = %variant_id, quantity, "Cart quantity changed");
        Ok(Some(self.crud.mapper().to_read(&item)))
    }

    /// Removes a variant from the cart. `false` if it was not there.
    pub async fn remove_item(&self, user_id: Uuid, variant_id: Uuid) -> AppResult<bool> {
        let Some(item) = self.find_line(user_id, variant_id).await? else {
            return Ok(false);
        };
        let removed = self.crud.repository().hard_delete(item.audit.id).await?;
        if removed {
            info!(user_id = %user_id, variant_id = %variant_id, "Cart item removed");
        }
        Ok(removed)
    }

    /// Empties the cart. Returns the number of removed lines.
    pub async fn clear(&self, user_id: Uuid) -> AppResult<u64> {
        let ids: Vec<Uuid> = self
            .crud
            .repository()
            .get_all(&Self::cart_of(user_id))
            .await?
            .iter()
            .map(|item| item.audit.id)
            .collect();
        if ids.is_empty() {
            return Ok(0);
        }
        let removed = self.crud.repository().hard_delete_range(&ids).await?;
        info!(user_id = %user_id, removed, "Cart cleared");
        Ok(removed)
    }

    /// Raw cart rows in the order they were added.
    pub async fn items(&self, user_id: Uuid) -> AppResult<Vec<CartItemResponse>> {
        self.crud.get_all(&Self::cart_of(user_id)).await
    }

    /// Priced cart contents.
    ///
    /// Lines whose variant or product no longer exists are left out.
    pub async fn summary(&self, user_id: Uuid) -> AppResult<CartSummary> {
        let items = self.crud.repository().get_all(&Self::cart_of(user_id)).await?;
        let mut products: HashMap<Uuid, Option<Product>> = HashMap::new();
        let mut lines = Vec::with_capacity(items.len());

        for item in items {
            let Some(variant) = self.variants.get_by_id(item.variant_id).await? else {
                warn!(user_id = %user_id, variant_id = %item.variant_id, "Cart references a missing variant");
                continue;
            };
            let product = match products.get(&variant.product_id) {
                Some(product) => product.clone(),
                None => {
                    let product = self.products.get_by_id(variant.product_id).await?;
                    products.insert(variant.product_id, product.clone());
                    product
                }
            };
            let Some(product) = product else {
                warn!(user_id = %user_id, product_id = %variant.product_id, "Cart references a missing product");
                continue;
            };
            lines.push(CartLine {
                item_id: item.audit.id,
                variant_id: variant.audit.id,
                product_id: product.audit.id,
                product_name: product.name.clone(),
                sku: variant.sku.clone(),
                size: variant.size.clone(),
                color: variant.color.clone(),
                quantity: item.quantity,
                unit_price: variant.price,
                line_total: line_total(variant.price, item.quantity),
                available: variant.is_purchasable() && product.audit.is_active && variant.has_stock(item.quantity),
            });
        }

        let item_count = lines.iter().map(|l| i64::from(l.quantity)).sum();
        let subtotal = lines.iter().map(|l| l.line_total).sum::<Decimal>();
        Ok(CartSummary {
            user_id,
            lines,
            item_count,
            subtotal,
        })
    }

    async fn find_line(&self, user_id: Uuid, variant_id: Uuid) -> AppResult<Option<CartItem>> {
        self.crud
            .repository()
            .find(
                &QuerySpec::new()
                    .filter(FilterField::eq("user_id", user_id))
                    .filter(FilterField::eq("variant_id", variant_id)),
            )
            .await
    }

    async fn purchasable_variant(&self, variant_id: Uuid) -> AppResult<ProductVariant> {
        let variant = self
            .variants
            .get_by_id(variant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product variant {variant_id} not found")))?;
        if !variant.is_purchasable() {
            warn!(variant_id = %variant_id, "Inactive variant rejected");
            return Err(AppError::business_rule(format!("{} is not available", variant.sku)));
        }
        Ok(variant)
    }

    fn check_stock(&self, variant: &ProductVariant, quantity: i32) -> AppResult<()> {
        if !variant.has_stock(quantity) {
            warn!(variant_id = %variant.audit.id, requested = quantity, available = variant.stock_quantity, "Cart quantity exceeds stock");
            return Err(AppError::business_rule(format!(
                "Only {} units of {} are in stock",
                variant.stock_quantity, variant.sku
            )));
        }
        Ok(())
    }

    fn cart_of(user_id: Uuid) -> QuerySpec {
        QuerySpec::new()
            .filter(FilterField::eq("user_id", user_id))
            .sort(SortField::asc("created_at"))
    }
}

impl Service for CartService {}
