//! Product and variant entities.

pub mod model;
pub mod variant;

pub use model::Product;
pub use variant::ProductVariant;
