//! Cart item entity/DTO mapping.

use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::traits::Mapper;
use storefront_core::types::Audit;
use storefront_entity::cart::CartItem;

use super::dto::{AddCartItemRequest, CartItemResponse, UpdateCartItemRequest};

/// Maps [`CartItem`] to and from its DTOs.
#[derive(Debug, Clone, Default)]
pub struct CartItemMapper;

impl Mapper for CartItemMapper {
    type Entity = CartItem;
    type Read = CartItemResponse;
    type Create = AddCartItemRequest;
    type Update = UpdateCartItemRequest;

    fn to_read(&self, item: &CartItem) -> CartItemResponse {
        CartItemResponse {
            id: item.audit.id,
            user_id: item.user_id,
            variant_id: item.variant_id,
            quantity: item.quantity,
            created_at: item.audit.created_at,
        }
    }

    fn from_create(&self, dto: AddCartItemRequest, created_by: Option<Uuid>) -> AppResult<CartItem> {
        Ok(CartItem {
            audit: Audit::created_by(created_by),
            user_id: dto.user_id,
            variant_id: dto.variant_id,
            quantity: dto.quantity,
        })
    }

    fn apply_update(&self, item: &mut CartItem, dto: UpdateCartItemRequest) -> AppResult<()> {
        if let Some(quantity) = dto.quantity {
            item.quantity = quantity;
        }
        Ok(())
    }
}
