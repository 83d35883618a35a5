//! Wishlist services.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{AddWishlistItemRequest, WishlistItemResponse};
pub use mapper::{WishlistExpander, WishlistMapper};
pub use service::WishlistService;
