//! Customer account entities.

pub mod model;

pub use model::User;
