//! Field validators shared by request DTOs.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

/// Money amounts must not be negative.
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("non_negative", "must not be negative"));
    }
    Ok(())
}

/// Payment amounts must be strictly positive.
pub fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(error("positive", "must be greater than zero"));
    }
    Ok(())
}

/// Build a validation error with a message.
pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}
