//! Coupon services.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{CouponResponse, CouponValidation, CreateCouponRequest, UpdateCouponRequest};
pub use mapper::CouponMapper;
pub use service::CouponService;
