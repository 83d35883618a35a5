//! Core type definitions used across the storefront workspace.

pub mod audit;
pub mod change_set;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod sorting;

pub use audit::Audit;
pub use change_set::{Change, ChangeSet};
pub use filter::{FilterField, FilterOp, FilterValue};
pub use pagination::{PageRequest, PageResponse};
pub use query::QuerySpec;
pub use sorting::{SortDirection, SortField};
