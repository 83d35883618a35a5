//! Shopping cart services.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{AddCartItemRequest, CartItemResponse, CartLine, CartSummary, UpdateCartItemRequest};
pub use mapper::CartItemMapper;
pub use service::CartService;
