//! PostgreSQL adapter.

pub mod entity;
pub mod query;
pub mod repository;

pub use entity::PgEntity;
pub use repository::PgRepository;
