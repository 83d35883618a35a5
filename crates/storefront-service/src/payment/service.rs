//! Payment lifecycle and its effect on order status.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{Mapper, Repository, Service};
use storefront_core::types::{FilterField, QuerySpec, SortField};
use storefront_entity::order::{Order, OrderStatus};
use storefront_entity::payment::{Payment, PaymentStatus};

use super::dto::{PaymentResponse, RecordPaymentRequest};
use super::mapper::PaymentMapper;
use crate::context::RequestContext;
use crate::crud::CrudService;

/// Records payments and settles orders.
#[derive(Clone)]
pub struct PaymentService {
    /// Generic CRUD over payments.
    crud: CrudService<PaymentMapper>,
    orders: Arc<dyn Repository<Order>>,
}

impl PaymentService {
    /// Creates a new payment service.
    pub fn new(payments: Arc<dyn Repository<Payment>>, orders: Arc<dyn Repository<Order>>) -> Self {
        Self {
            crud: CrudService::new(payments, PaymentMapper),
            orders,
        }
    }

    /// Generic CRUD operations.
    pub fn crud(&self) -> &CrudService<PaymentMapper> {
        &self.crud
    }

    /// Records a pending payment for an open order.
    pub async fn record(&self, ctx: &RequestContext, req: RecordPaymentRequest) -> AppResult<PaymentResponse> {
        let order = self.require_order(req.order_id).await?;
        if order.status.is_terminal() {
            return Err(AppError::business_rule(format!(
                "Order {} is {} and cannot take payments",
                order.order_number, order.status
            )));
        }
        let payment = self.crud.create(ctx, req).await?;
        info!(payment_id = %payment.id, order_id = %payment.order_id, amount = %payment.amount, method = %payment.method, "Payment recorded");
        Ok(payment)
    }

    /// Marks a pending payment completed. The order becomes `Paid` once its
    /// completed payments cover the total.
    pub async fn complete(
        &self,
        payment_id: Uuid,
        transaction_reference: Option<String>,
        now: DateTime<Utc>,
    ) -> AppResult<PaymentResponse> {
        let mut payment = self.require_pending(payment_id).await?;
        payment.status = PaymentStatus::Completed;
        payment.transaction_reference = transaction_reference;
        payment.paid_at = Some(now);
        let payment = self.crud.repository().update(payment).await?;
        info!(payment_id = %payment_id, order_id = %payment.order_id, "Payment completed");

        let mut order = self.require_order(payment.order_id).await?;
        let paid = self.settled_amount(order.audit.id).await?;
        if order.status == OrderStatus::Pending && paid >= order.total_amount {
            order.status = OrderStatus::Paid;
            self.orders.update(order).await?;
            info!(order_id = %payment.order_id, paid = %paid, "Order paid");
        }
        Ok(self.crud.mapper().to_read(&payment))
    }

    /// Marks a pending payment failed.
    pub async fn fail(&self, payment_id: Uuid) -> AppResult<PaymentResponse> {
        let mut payment = self.require_pending(payment_id).await?;
        payment.status = PaymentStatus::Failed;
        let payment = self.crud.repository().update(payment).await?;
        warn!(payment_id = %payment_id, order_id = %payment.order_id, "Payment failed");
        Ok(self.crud.mapper().to_read(&payment))
    }

    /// Refunds a completed payment. The order becomes `Refunded` when no
    /// completed payment remains.
    pub async fn refund(&self, payment_id: Uuid) -> AppResult<PaymentResponse> {
        let mut payment = self.require(payment_id).await?;
        if payment.status != PaymentStatus::Completed {
            return Err(AppError::business_rule(format!(
                "Only completed payments can be refunded (payment is {})",
                payment.status
            )));
        }
        payment.status = PaymentStatus::Refunded;
        let payment = self.crud.repository().update(payment).await?;
        info!(payment_id = %payment_id, order_id = %payment.order_id, amount = %payment.amount, "Payment refunded");

        let mut order = self.require_order(payment.order_id).await?;
        if self.settled_amount(order.audit.id).await?.is_zero()
            && order.status.can_transition_to(OrderStatus::Refunded)
        {
            order.status = OrderStatus::Refunded;
            self.orders.update(order).await?;
            info!(order_id = %payment.order_id, "Order refunded");
        }
        Ok(self.crud.mapper().to_read(&payment))
    }

    /// Payments of an order in the order they were recorded.
    pub async fn list_for_order(&self, order_id: Uuid) -> AppResult<Vec<PaymentResponse>> {
        self.crud
            .get_all(
                &QuerySpec::new()
                    .filter(FilterField::eq("order_id", order_id))
                    .sort(SortField::asc("created_at")),
            )
            .await
    }

    async fn settled_amount(&self, order_id: Uuid) -> AppResult<Decimal> {
        let completed = self
            .crud
            .repository()
            .get_all(
                &QuerySpec::new()
                    .filter(FilterField::eq("order_id", order_id))
                    .filter(FilterField::eq("status", PaymentStatus::Completed.as_str())),
            )
            .await?;
        Ok(completed.iter().map(|p| p.amount).sum())
    }

    async fn require(&self, id: Uuid) -> AppResult<Payment> {
        self.crud
            .repository()
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment {id} not found")))
    }

    async fn require_pending(&self, id: Uuid) -> AppResult<Payment> {
        let payment = self.require(id).await?;
        if payment.status != PaymentStatus::Pending {
            return Err(AppError::business_rule(format!(
                "Payment {id} is already {}",
                payment.status
            )));
        }
        Ok(payment)
    }

    async fn require_order(&self, id: Uuid) -> AppResult<Order> {
        self.orders
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {id} not found")))
    }
}

impl Service for PaymentService {}
