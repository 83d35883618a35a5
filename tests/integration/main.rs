//! Workspace integration tests, run against the in-memory backend.

mod helpers;

mod address_test;
mod cart_test;
mod catalog_test;
mod checkout_test;
mod coupon_test;
mod payment_test;
mod repository_test;
mod review_test;
