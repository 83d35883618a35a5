//! Discount type enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "discount_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Percent of the order amount.
    Percentage,
    /// Flat amount off.
    FixedAmount,
}

impl DiscountType {
    /// Return the type as its storage spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::FixedAmount => "fixed_amount",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DiscountType {
    type Err = storefront_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "percentage" | "percent" => Ok(Self::Percentage),
            "fixed_amount" | "fixed" => Ok(Self::FixedAmount),
            _ => Err(storefront_core::AppError::validation(format!(
                "Invalid discount type: '{s}'. Expected one of: percentage, fixed_amount"
            ))),
        }
    }
}
