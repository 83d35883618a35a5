//! Product catalog services.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{CreateProductRequest, ProductResponse, ProductSearch, UpdateProductRequest};
pub use mapper::{ProductExpander, ProductMapper};
pub use service::ProductService;
