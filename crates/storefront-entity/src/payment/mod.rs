//! Payment entities.

pub mod method;
pub mod model;
pub mod status;

pub use method::PaymentMethod;
pub use model::Payment;
pub use status::PaymentStatus;
