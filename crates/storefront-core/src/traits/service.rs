//! Service marker trait.

/// Marker trait for business logic services.
///
/// Every service in `storefront-service` implements this trait so that the
/// wiring layer can hold them uniformly behind `Arc`.
pub trait Service: Send + Sync + 'static {}
