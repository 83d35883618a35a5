//! Order entity/DTO mapping and relation loading.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository};
use storefront_core::types::{FilterField, QuerySpec, SortField};
use storefront_entity::order::{Order, OrderItem};
use storefront_entity::payment::Payment;

use super::dto::{OrderItemResponse, OrderResponse, UpdateOrderRequest};
use crate::crud::{Expand, NoChanges};
use crate::payment::PaymentMapper;

/// Maps [`Order`] to its read DTO.
///
/// Orders only come into existence through checkout, so `from_create`
/// always fails.
#[derive(Debug, Clone, Default)]
pub struct OrderMapper;

impl Mapper for OrderMapper {
    type Entity = Order;
    type Read = OrderResponse;
    type Create = NoChanges;
    type Update = UpdateOrderRequest;

    fn to_read(&self, order: &Order) -> OrderResponse {
        OrderResponse {
            id: order.audit.id,
            order_number: order.order_number.clone(),
            user_id: order.user_id,
            status: order.status,
            shipping_address_id: order.shipping_address_id,
            coupon_id: order.coupon_id,
            subtotal: order.subtotal,
            discount_amount: order.discount_amount,
            shipping_fee: order.shipping_fee,
            total_amount: order.total_amount,
            notes: order.notes.clone(),
            created_at: order.audit.created_at,
            updated_at: order.audit.updated_at,
            items: None,
            payments: None,
        }
    }

    fn from_create(&self, _dto: NoChanges, _created_by: Option<Uuid>) -> AppResult<Order> {
        Err(AppError::business_rule("Orders are created by placing them from a cart"))
    }

    fn apply_update(&self, order: &mut Order, dto: UpdateOrderRequest) -> AppResult<()> {
        if let Some(notes) = dto.notes {
            order.notes = Some(notes);
        }
        Ok(())
    }
}

/// Maps [`OrderItem`] to its read DTO. Lines are immutable.
#[derive(Debug, Clone, Default)]
pub struct OrderItemMapper;

impl Mapper for OrderItemMapper {
    type Entity = OrderItem;
    type Read = OrderItemResponse;
    type Create = NoChanges;
    type Update = NoChanges;

    fn to_read(&self, item: &OrderItem) -> OrderItemResponse {
        OrderItemResponse {
            id: item.audit.id,
            order_id: item.order_id,
            variant_id: item.variant_id,
            product_name: item.product_name.clone(),
            sku: item.sku.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            line_total: item.line_total,
        }
    }

    fn from_create(&self, _dto: NoChanges, _created_by: Option<Uuid>) -> AppResult<OrderItem> {
        Err(AppError::business_rule("Order items are created by placing an order"))
    }

    fn apply_update(&self, _item: &mut OrderItem, _dto: NoChanges) -> AppResult<()> {
        Ok(())
    }
}

/// Loads `items` and `payments`.
pub struct OrderExpander {
    items: Arc<dyn Repository<OrderItem>>,
    payments: Arc<dyn Repository<Payment>>,
}

impl OrderExpander {
    /// Creates an expander over line items and payments.
    pub fn new(items: Arc<dyn Repository<OrderItem>>, payments: Arc<dyn Repository<Payment>>) -> Self {
        Self { items, payments }
    }
}

#[async_trait]
impl Expand<OrderMapper> for OrderExpander {
    async fn expand(&self, read: &mut OrderResponse, order: &Order, includes: &[String]) -> AppResult<()> {
        let of_order = QuerySpec::new()
            .filter(FilterField::eq("order_id", order.audit.id))
            .sort(SortField::asc("created_at"));
        for include in includes {
            match include.as_str() {
                "items" => {
                    let items = self.items.get_all(&of_order).await?;
                    read.items = Some(items.iter().map(|i| OrderItemMapper.to_read(i)).collect());
                }
                "payments" => {
                    let payments = self.payments.get_all(&of_order).await?;
                    read.payments = Some(payments.iter().map(|p| PaymentMapper.to_read(p)).collect());
                }
                _ => {}
            }
        }
        Ok(())
    }
}
