//! Coupon entities.

pub mod discount_type;
pub mod model;

pub use discount_type::DiscountType;
pub use model::{Coupon, CouponRejection};
