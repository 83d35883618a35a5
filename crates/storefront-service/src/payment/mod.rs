//! Payment records.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{PaymentResponse, RecordPaymentRequest};
pub use mapper::PaymentMapper;
pub use service::PaymentService;
