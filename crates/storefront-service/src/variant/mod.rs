//! Product variant (SKU) services and stock keeping.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{CreateVariantRequest, UpdateVariantRequest, VariantResponse};
pub use mapper::VariantMapper;
pub use service::VariantService;
