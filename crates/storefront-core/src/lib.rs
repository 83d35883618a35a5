//! # storefront-core
//!
//! Core crate for the storefront. Contains the generic repository and
//! mapping traits, configuration schemas, the typed query specification,
//! pagination/sorting/filter types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other storefront crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
