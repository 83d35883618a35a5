//! Product review services.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{CreateReviewRequest, ProductRating, ReviewResponse, UpdateReviewRequest};
pub use mapper::ReviewMapper;
pub use service::ReviewService;
