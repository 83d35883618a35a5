//! Payment method enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// PayPal account. The gateway itself is external.
    #[sqlx(rename = "paypal")]
    #[serde(rename = "paypal")]
    PayPal,
    /// Paid to the courier.
    CashOnDelivery,
    /// Wire transfer.
    BankTransfer,
}

impl PaymentMethod {
    /// Return the method as its storage spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::PayPal => "paypal",
            Self::CashOnDelivery => "cash_on_delivery",
            Self::BankTransfer => "bank_transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = storefront_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "card" => Ok(Self::Card),
            "paypal" => Ok(Self::PayPal),
            "cash_on_delivery" | "cod" => Ok(Self::CashOnDelivery),
            "bank_transfer" => Ok(Self::BankTransfer),
            _ => Err(storefront_core::AppError::validation(format!(
                "Invalid payment method: '{s}'. Expected one of: card, paypal, \
                 cash_on_delivery, bank_transfer"
            ))),
        }
    }
}
