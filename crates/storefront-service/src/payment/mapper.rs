//! Payment entity/DTO mapping.

use uuid::Uuid;

use storefront_core::result::AppResult;
use storefront_core::traits::Mapper;
use storefront_core::types::Audit;
use storefront_entity::money::round_money;
use storefront_entity::payment::{Payment, PaymentStatus};

use super::dto::{PaymentResponse, RecordPaymentRequest};
use crate::crud::NoChanges;

/// Maps [`Payment`] to and from its DTOs. Status moves through
/// [`PaymentService`](super::PaymentService), never through patches.
#[derive(Debug, Clone, Default)]
pub struct PaymentMapper;

impl Mapper for PaymentMapper {
    type Entity = Payment;
    type Read = PaymentResponse;
    type Create = RecordPaymentRequest;
    type Update = NoChanges;

    fn to_read(&self, payment: &Payment) -> PaymentResponse {
        PaymentResponse {
            id: payment.audit.id,
            order_id: payment.order_id,
            amount: payment.amount,
            method: payment.method,
            status: payment.status,
            transaction_reference: payment.transaction_reference.clone(),
            paid_at: payment.paid_at,
            created_at: payment.audit.created_at,
        }
    }

    fn from_create(&self, dto: RecordPaymentRequest, created_by: Option<Uuid>) -> AppResult<Payment> {
        Ok(Payment {
            audit: Audit::created_by(created_by),
            order_id: dto.order_id,
            amount: round_money(dto.amount),
            method: dto.method,
            status: PaymentStatus::Pending,
            transaction_reference: None,
            paid_at: None,
        })
    }

    fn apply_update(&self, _payment: &mut Payment, _dto: NoChanges) -> AppResult<()> {
        Ok(())
    }
}
