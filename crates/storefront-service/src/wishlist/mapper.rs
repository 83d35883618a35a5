//! Wishlist entity/DTO mapping and relation loading.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository};
use storefront_core::types::Audit;
use storefront_entity::product::Product;
use storefront_entity::wishlist::WishlistItem;

use super::dto::{AddWishlistItemRequest, WishlistItemResponse};
use crate::crud::{Expand, NoChanges};
use crate::product::ProductMapper;

/// Maps [`WishlistItem`] to and from its DTOs. Entries are never patched.
#[derive(Debug, Clone, Default)]
pub struct WishlistMapper;

impl Mapper for WishlistMapper {
    type Entity = WishlistItem;
    type Read = WishlistItemResponse;
    type Create = AddWishlistItemRequest;
    type Update = NoChanges;

    fn to_read(&self, item: &WishlistItem) -> WishlistItemResponse {
        WishlistItemResponse {
            id: item.audit.id,
            user_id: item.user_id,
            product_id: item.product_id,
            created_at: item.audit.created_at,
            product: None,
        }
    }

    fn from_create(&self, dto: AddWishlistItemRequest, created_by: Option<Uuid>) -> AppResult<WishlistItem> {
        Ok(WishlistItem {
            audit: Audit::created_by(created_by),
            user_id: dto.user_id,
            product_id: dto.product_id,
        })
    }

    fn apply_update(&self, _item: &mut WishlistItem, _dto: NoChanges) -> AppResult<()> {
        Ok(())
    }
}

/// Loads the `product` relation.
pub struct WishlistExpander {
    products: Arc<dyn Repository<Product>>,
}

impl WishlistExpander {
    /// Creates an expander reading from `products`.
    pub fn new(products: Arc<dyn Repository<Product>>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl Expand<WishlistMapper> for WishlistExpander {
    async fn expand(
        &self,
        read: &mut WishlistItemResponse,
        item: &WishlistItem,
        includes: &[String],
    ) -> AppResult<()> {
        if includes.iter().any(|i| i == "product") {
            let product = self.products.get_by_id(item.product_id).await?;
            read.product = product.map(|p| ProductMapper.to_read(&p));
        }
        Ok(())
    }
}
