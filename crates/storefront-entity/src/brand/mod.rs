//! Brand entities.

pub mod model;

pub use model::Brand;
