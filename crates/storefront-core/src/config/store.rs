//! Storefront pricing and cart rules.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Commerce settings consulted by the cart and order services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// ISO currency code used for every price.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Flat shipping fee added to an order.
    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: Decimal,
    /// Orders whose discounted subtotal reaches this amount ship for free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: Decimal,
    /// Upper bound on the quantity of one variant in a cart.
    #[serde(default = "default_max_quantity_per_item")]
    pub max_quantity_per_item: i32,
    /// Prefix of generated order numbers.
    #[serde(default = "default_order_number_prefix")]
    pub order_number_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            shipping_fee: default_shipping_fee(),
            free_shipping_threshold: default_free_shipping_threshold(),
            max_quantity_per_item: default_max_quantity_per_item(),
            order_number_prefix: default_order_number_prefix(),
        }
    }
}

impl StoreConfig {
    /// Shipping fee for an order with the given discounted subtotal.
    pub fn shipping_for(&self, subtotal: Decimal) -> Decimal {
        if subtotal >= self.free_shipping_threshold {
            Decimal::ZERO
        } else {
            self.shipping_fee
        }
    }
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_shipping_fee() -> Decimal {
    Decimal::new(799, 2)
}

fn default_free_shipping_threshold() -> Decimal {
    Decimal::new(100, 0)
}

fn default_max_quantity_per_item() -> i32 {
    10
}

fn default_order_number_prefix() -> String {
    "ORD".to_string()
}
