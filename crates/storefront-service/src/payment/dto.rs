//! Payment DTOs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use storefront_entity::payment::{PaymentMethod, PaymentStatus};

use crate::validation::positive;

/// Record a payment attempt against an order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    /// Order being paid.
    pub order_id: Uuid,
    /// Amount charged.
    #[validate(custom(function = "positive"))]
    pub amount: Decimal,
    /// Payment instrument.
    pub method: PaymentMethod,
}

/// Payment as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// Payment ID.
    pub id: Uuid,
    /// Paid order.
    pub order_id: Uuid,
    /// Amount.
    pub amount: Decimal,
    /// Instrument.
    pub method: PaymentMethod,
    /// Settlement state.
    pub status: PaymentStatus,
    /// Provider reference.
    pub transaction_reference: Option<String>,
    /// Completion time.
    pub paid_at: Option<DateTime<Utc>>,
    /// When it was recorded.
    pub created_at: DateTime<Utc>,
}
