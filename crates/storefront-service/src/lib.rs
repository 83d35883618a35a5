//! # storefront-service
//!
//! Business logic for the storefront. [`crud::CrudService`] gives every
//! entity the same DTO-speaking read/write surface over a repository; the
//! per-entity services wrap it and add their own rules (stock, carts,
//! coupons, checkout, payments).
//!
//! Services follow constructor injection: repositories, collaborators and
//! settings are handed in at construction time. [`Services`] wires the
//! whole set from a [`storefront_database::Repositories`].

pub mod address;
pub mod brand;
pub mod cart;
pub mod category;
pub mod context;
pub mod coupon;
pub mod crud;
pub mod email;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod services;
pub mod user;
pub mod validation;
pub mod variant;
pub mod wishlist;

pub use address::AddressService;
pub use brand::BrandService;
pub use cart::CartService;
pub use category::CategoryService;
pub use context::RequestContext;
pub use coupon::CouponService;
pub use crud::{CrudService, Expand, NoChanges};
pub use email::LogEmailSender;
pub use order::OrderService;
pub use payment::PaymentService;
pub use product::ProductService;
pub use review::ReviewService;
pub use services::Services;
pub use user::UserService;
pub use variant::VariantService;
pub use wishlist::WishlistService;
