//! Checkout and order lifecycle.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{OrderItemResponse, OrderResponse, PlaceOrderRequest, UpdateOrderRequest};
pub use mapper::{OrderExpander, OrderItemMapper, OrderMapper};
pub use service::OrderService;
