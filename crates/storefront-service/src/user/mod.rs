//! Customer account services.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
pub use mapper::UserMapper;
pub use service::UserService;
