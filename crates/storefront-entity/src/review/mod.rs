//! Product review entities.

pub mod model;

pub use model::{MAX_RATING, MIN_RATING, Review};
