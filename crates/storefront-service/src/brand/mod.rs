//! Brand services.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{BrandResponse, CreateBrandRequest, UpdateBrandRequest};
pub use mapper::{BrandExpander, BrandMapper};
pub use service::BrandService;
