//! In-process storage adapter.

pub mod repository;

pub use repository::MemoryRepository;
