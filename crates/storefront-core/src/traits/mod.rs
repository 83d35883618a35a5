//! Core traits defined in `storefront-core` and implemented by other crates.

pub mod email;
pub mod entity;
pub mod mapper;
pub mod repository;
pub mod service;

pub use email::EmailSender;
pub use entity::{Entity, UniqueKey};
pub use mapper::Mapper;
pub use repository::Repository;
pub use service::Service;
