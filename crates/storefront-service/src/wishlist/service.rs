//! Wishlist operations.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Repository, Service};
use storefront_core::types::{FilterField, QuerySpec, SortField};
use storefront_entity::product::{Product, ProductVariant};
use storefront_entity::wishlist::WishlistItem;

use super::dto::{AddWishlistItemRequest, WishlistItemResponse};
use super::mapper::{WishlistExpander, WishlistMapper};
use crate::cart::{AddCartItemRequest, CartItemResponse, CartService};
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Manages wishlists.
#[derive(Clone)]
pub struct WishlistService {
    /// Generic CRUD over wishlist entries.
    crud: CrudService<WishlistMapper>,
    products: Arc<dyn Repository<Product>>,
    variants: Arc<dyn Repository<ProductVariant>>,
    cart: CartService,
}

impl WishlistService {
    /// Creates a new wishlist service.
    pub fn new(
        wishlist_items: Arc<dyn Repository<WishlistItem>>,
        products: Arc<dyn Repository<Product>>,
        variants: Arc<dyn Repository<ProductVariant>>,
        cart: CartService,
    ) -> Self {
        Self {
            crud: CrudService::new(wishlist_items, WishlistMapper)
                .with_expander(WishlistExpander::new(Arc::clone(&products))),
            products,
            variants,
            cart,
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<WishlistMapper> {
        &self.crud
    }

    /// Adds a product. Adding a product already present returns the
    /// existing entry.
    pub async fn add(&self, ctx: &RequestContext, req: AddWishlistItemRequest) -> AppResult<WishlistItemResponse> {
        if self.products.get_by_id(req.product_id).await?.is_none() {
            return Err(AppError::not_found(format!("Product {} not found", req.product_id)));
        }
        if let Some(existing) = self.find_entry(req.user_id, req.product_id).await? {
            return self.crud.to_read(&existing, &[]).await;
        }
        let item = self.crud.create(ctx, req).await?;
        info!(user_id = %item.user_id, product_id = %item.product_id, "Wishlist item added");
        Ok(item)
    }

    /// Removes a product. `false` if it was not on the list.
    pub async fn remove(&self, user_id: Uuid, product_id: Uuid) -> AppResult<bool> {
        let Some(entry) = self.find_entry(user_id, product_id).await? else {
            return Ok(false);
        };
        let removed = self.crud.repository().hard_delete(entry.audit.id).await?;
        if removed {
            info!(user_id = %user_id, product_id = %product_id, "Wishlist item removed");
        }
        Ok(removed)
    }

    /// A user's wishlist, newest first, with products loaded.
    pub async fn list(&self, user_id: Uuid) -> AppResult<Vec<WishlistItemResponse>> {
        self.crud
            .get_all(
                &QuerySpec::new()
                    .filter(FilterField::eq("user_id", user_id))
                    .sort(SortField::desc("created_at"))
                    .include("product"),
            )
            .await
    }

    /// Puts one variant of a wishlisted product into the cart and drops the
    /// wishlist entry.
    pub async fn move_to_cart(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        product_id: Uuid,
        variant_id: Uuid,
        quantity: i32,
    ) -> AppResult<CartItemResponse> {
        if self.find_entry(user_id, product_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "Product {product_id} is not on the wishlist"
            )));
        }
        let variant = self
            .variants
            .get_by_id(variant_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product variant {variant_id} not found")))?;
        if variant.product_id != product_id {
            return Err(AppError::validation(format!(
                "Variant {} does not belong to product {product_id}",
                variant.sku
            )));
        }
        let item = self
            .cart
            .add_item(
                ctx,
                AddCartItemRequest {
                    user_id,
                    variant_id,
                    quantity,
                },
            )
            .await?;
        self.remove(user_id, product_id).await?;
        info!(user_id = %user_id, product_id = %product_id, variant_id = %variant_id, "Wishlist item moved to cart");
        Ok(item)
    }

    async fn find_entry(&self, user_id: Uuid, product_id: Uuid) -> AppResult<Option<WishlistItem>> {
        self.crud
            .repository()
            .find(
                &QuerySpec::new()
                    .filter(FilterField::eq("user_id", user_id))
                    .filter(FilterField::eq("product_id", product_id)),
            )
            .await
    }
}

impl Service for WishlistService {}
