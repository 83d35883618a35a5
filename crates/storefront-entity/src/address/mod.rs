//! Address book entities.

pub mod model;

pub use model::Address;
