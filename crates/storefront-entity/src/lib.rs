//! # storefront-entity
//!
//! Domain entity models for the storefront. Every struct in this crate is
//! a table row: it embeds the shared [`Audit`] block, derives `Debug`,
//! `Clone`, `Serialize`, `Deserialize` and `sqlx::FromRow`, and implements
//! [`Entity`] so the generic repositories can store it.
//!
//! [`Audit`]: storefront_core::types::Audit
//! [`Entity`]: storefront_core::traits::Entity

pub mod address;
pub mod brand;
pub mod cart;
pub mod category;
pub mod coupon;
pub mod money;
pub mod order;
pub mod payment;
pub mod product;
pub mod review;
pub mod slug;
pub mod user;
pub mod wishlist;
