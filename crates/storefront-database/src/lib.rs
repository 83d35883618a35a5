//! # storefront-database
//!
//! Storage adapters for the generic [`Repository`] contract: a PostgreSQL
//! adapter built on `sqlx::QueryBuilder` and an in-memory adapter used by
//! tests and the `memory` backend. Also owns connection management,
//! migrations and reference seed data.
//!
//! [`Repository`]: storefront_core::traits::Repository

pub mod connection;
pub mod error;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod seed;

pub use connection::DatabasePool;
pub use memory::MemoryRepository;
pub use postgres::{PgEntity, PgRepository};
pub use repositories::Repositories;
