//! Shipping address services.

pub mod dto;
pub mod mapper;
pub mod service;

pub use dto::{AddressResponse, CreateAddressRequest, UpdateAddressRequest};
pub use mapper::AddressMapper;
pub use service::AddressService;
