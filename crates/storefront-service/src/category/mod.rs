//! Category services.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
pub use mapper::{CategoryExpander, CategoryMapper};
pub use service::CategoryService;
