//! Order request and response DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use storefront_entity::order::OrderStatus;

use crate::payment::PaymentResponse;

/// Turn a user's cart into an order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    /// Customer.
    pub user_id: Uuid,
    /// Delivery address. The user's default when absent.
    pub shipping_address_id: Option<Uuid>,
    /// Coupon to apply.
    #[validate(length(min = 3, max = 50, message = "Coupon code must be 3-50 characters"))]
    pub coupon_code: Option<String>,
    /// Delivery notes.
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Partial order update. Status moves through the lifecycle operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    /// New delivery notes.
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Order line as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    /// Line ID.
    pub id: Uuid,
    /// Owning order.
    pub order_id: Uuid,
    /// Purchased variant.
    pub variant_id: Uuid,
    /// Product name at order time.
    pub product_name: String,
    /// SKU at order time.
    pub sku: String,
    /// Units.
    pub quantity: i32,
    /// Unit price at order time.
    pub unit_price: Decimal,
    /// Line total.
    pub line_total: Decimal,
}

/// Order as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Order ID.
    pub id: Uuid,
    /// Human-facing number.
    pub order_number: String,
    /// Customer.
    pub user_id: Uuid,
    /// Lifecycle state.
    pub status: OrderStatus,
    /// Delivery address.
    pub shipping_address_id: Option<Uuid>,
    /// Applied coupon.
    pub coupon_id: Option<Uuid>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Coupon discount.
    pub discount_amount: Decimal,
    /// Delivery charge.
    pub shipping_fee: Decimal,
    /// Amount due.
    pub total_amount: Decimal,
    /// Delivery notes.
    pub notes: Option<String>,
    /// Placement time.
    pub created_at: DateTime<Utc>,
    /// Last change.
    pub updated_at: DateTime<Utc>,
    /// Lines, when `items` was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItemResponse>>,
    /// Payments, when `payments` was included.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payments: Option<Vec<PaymentResponse>>,
}
