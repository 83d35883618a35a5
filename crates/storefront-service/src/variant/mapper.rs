//! Variant entity/DTO mapping.

use rust_decimal::Decimal;
use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::traits::Mapper;
use storefront_core::types::Audit;
use storefront_entity::product::ProductVariant;

use super::dto::{CreateVariantRequest, UpdateVariantRequest, VariantResponse};

/// Maps [`ProductVariant`] to and from its DTOs.
#[derive(Debug, Clone, Default)]
pub struct VariantMapper;

impl Mapper for VariantMapper {
    type Entity = ProductVariant;
    type Read = VariantResponse;
    type Create = CreateVariantRequest;
    type Update = UpdateVariantRequest;

    fn to_read(&self, variant: &ProductVariant) -> VariantResponse {
        VariantResponse {
            id: variant.audit.id,
            product_id: variant.product_id,
            sku: variant.sku.clone(),
            size: variant.size.clone(),
            color: variant.color.clone(),
            price: variant.price,
            stock_quantity: variant.stock_quantity,
            is_active: variant.audit.is_active,
            created_at: variant.audit.created_at,
        }
    }

    fn from_create(&self, dto: CreateVariantRequest, created_by: Option<Uuid>) -> AppResult<ProductVariant> {
        Ok(ProductVariant {
            audit: Audit::created_by(created_by),
            product_id: dto.product_id,
            sku: dto.sku.trim().to_uppercase(),
            size: dto.size,
            color: dto.color,
            price: dto.price.unwrap_or(Decimal::ZERO).round_dp(2),
            stock_quantity: dto.stock_quantity,
        })
    }

    fn apply_update(&self, variant: &mut ProductVariant, dto: UpdateVariantRequest) -> AppResult<()> {
        if let Some(sku) = dto.sku {
            variant.sku = sku.trim().to_uppercase();
        }
        if let Some(size) = dto.size {
            variant.size = Some(size);
        }
        if let Some(color) = dto.color {
            variant.color = Some(color);
        }
        if let Some(price) = dto.price {
            variant.price = price.round_dp(2);
        }
        if let Some(stock_quantity) = dto.stock_quantity {
            variant.stock_quantity = stock_quantity;
        }
        Ok(())
    }
}
