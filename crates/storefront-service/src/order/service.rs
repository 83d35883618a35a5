//! Checkout and the order lifecycle.
//!
//! Placing an order touches several repositories in sequence: stock is
//! reserved variant by variant, the coupon is redeemed, then the order and
//! its lines are written and the cart is emptied. A failure at any step
//! gives back what the earlier steps took: reserved stock, the coupon use
//! and any order rows already written.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use storefront_core::config::StoreConfig;
use storefront_core::error::AppError;
use storefront_core::result::AppResult;
use storefront_core::traits::{EmailSender, Mapper, Repository, Service};
use storefront_core::types::{Audit, FilterField, PageRequest, PageResponse, QuerySpec, SortField};
use storefront_database::Repositories;
use storefront_entity::address::Address;
use storefront_entity::money::round_money;
use storefront_entity::order::{Order, OrderItem, OrderStatus};
use storefront_entity::user::User;

use super::dto::{OrderResponse, PlaceOrderRequest, UpdateOrderRequest};
use super::mapper::{OrderExpander, OrderItemMapper, OrderMapper};
use crate::cart::{CartService, CartSummary};
use crate::context::RequestContext;
use crate::coupon::CouponService;
use crate::crud::CrudService;
use crate::variant::VariantService;

const DETAIL_INCLUDES: [&str; 2] = ["items", "payments"];

/// Places and manages orders.
#[derive(Clone)]
pub struct OrderService {
    /// Generic CRUD over orders, with `items` and `payments` expansion.
    crud: CrudService<OrderMapper>,
    order_items: Arc<dyn Repository<OrderItem>>,
    users: Arc<dyn Repository<User>>,
    addresses: Arc<dyn Repository<Address>>,
    cart: CartService,
    variants: VariantService,
    coupons: CouponService,
    email: Arc<dyn EmailSender>,
    store: StoreConfig,
}

impl OrderService {
    /// Creates a new order service.
    pub fn new(
        repos: &Repositories,
        cart: CartService,
        variants: VariantService,
        coupons: CouponService,
        email: Arc<dyn EmailSender>,
        store: StoreConfig,
    ) -> Self {
        let expander = OrderExpander::new(Arc::clone(&repos.order_items), Arc::clone(&repos.payments));
        Self {
            crud: CrudService::new(Arc::clone(&repos.orders), OrderMapper).with_expander(expander),
            order_items: Arc::clone(&repos.order_items),
            users: Arc::clone(&repos.users),
            addresses: Arc::clone(&repos.addresses),
            cart,
            variants,
            coupons,
            email,
            store,
        }
    }

    /// Generic reads.
    pub fn crud(&self) -> &CrudService<OrderMapper> {
        &self.crud
    }

    /// Turns the user's cart into a pending order.
    pub async fn place_order(&self, ctx: &RequestContext, req: PlaceOrderRequest) -> AppResult<OrderResponse> {
        req.validate()?;
        let user = self
            .users
            .get_by_id(req.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", req.user_id)))?;
        let address = self.shipping_address(&user, req.shipping_address_id).await?;

        let cart = self.cart.summary(user.audit.id).await?;
        if cart.is_empty() {
            return Err(AppError::business_rule("Cannot place an order with an empty cart"));
        }
        if let Some(line) = cart.lines.iter().find(|l| !l.available) {
            warn!(user_id = %user.audit.id, sku = %line.sku, "Checkout blocked by unavailable item");
            return Err(AppError::business_rule(format!(
                "{} is not available in the requested quantity",
                line.sku
            )));
        }

        let subtotal = round_money(cart.subtotal);
        let coupon = match req.coupon_code.as_deref() {
            Some(code) => {
                let validation = self.coupons.validate(code, subtotal, ctx.request_time).await?;
                if let Some(reason) = validation.reason {
                    warn!(user_id = %user.audit.id, code = %validation.code, %reason, "Coupon rejected at checkout");
                    return Err(AppError::business_rule(format!(
                        "Coupon '{}' is not valid: {reason}",
                        validation.code
                    )));
                }
                Some(validation)
            }
            None => None,
        };

        self.reserve_stock(&cart).await?;
        let discount_amount = match &coupon {
            Some(coupon) => match self.coupons.redeem(&coupon.code, subtotal, ctx.request_time).await {
                Ok(redeemed) => redeemed.discount_amount,
                Err(e) => {
                    self.release_stock(&cart).await;
                    return Err(e);
                }
            },
            None => Decimal::ZERO,
        };

        let shipping_fee = self.store.shipping_for(subtotal - discount_amount);
        let order = Order {
            audit: Audit::created_by(ctx.user_id),
            order_number: Order::generate_number(&self.store.order_number_prefix, ctx.request_time),
            user_id: user.audit.id,
            status: OrderStatus::Pending,
            shipping_address_id: Some(address.audit.id),
            coupon_id: coupon.as_ref().and_then(|c| c.coupon_id),
            subtotal,
            discount_amount,
            shipping_fee,
            total_amount: round_money(Order::compute_total(subtotal, discount_amount, shipping_fee)),
            notes: req.notes,
        };
        let coupon_code = coupon.as_ref().map(|c| c.code.as_str());
        let order = match self.crud.repository().add(order).await {
            Ok(order) => order,
            Err(e) => {
                self.unwind_checkout(&cart, coupon_code, None, &[]).await;
                return Err(e);
            }
        };

        let items: Vec<OrderItem> = cart
            .lines
            .iter()
            .map(|line| OrderItem {
                audit: Audit::created_by(ctx.user_id),
                order_id: order.audit.id,
                variant_id: line.variant_id,
                product_name: line.product_name.clone(),
                sku: line.sku.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total,
            })
            .collect();
        let items = match self.order_items.add_range(items).await {
            Ok(items) => items,
            Err(e) => {
                self.unwind_checkout(&cart, coupon_code, Some(&order), &[]).await;
                return Err(e);
            }
        };
        if let Err(e) = self.cart.clear(user.audit.id).await {
            let item_ids: Vec<Uuid> = items.iter().map(|i| i.audit.id).collect();
            self.unwind_checkout(&cart, coupon_code, Some(&order), &item_ids).await;
            return Err(e);
        }

        info!(
            order_id = %order.audit.id,
            order_number = %order.order_number,
            user_id = %user.audit.id,
            lines = items.len(),
            total = %order.total_amount,
            "Order placed"
        );
        self.send_confirmation(&user, &order).await;

        let mut read = self.crud.mapper().to_read(&order);
        read.items = Some(items.iter().map(|i| OrderItemMapper.to_read(i)).collect());
        Ok(read)
    }

    /// Cancels an order that has not shipped and returns its stock.
    ///
    /// Returns `None` when the order does not exist.
    pub async fn cancel(&self, id: Uuid) -> AppResult<Option<OrderResponse>> {
        let Some(mut order) = self.crud.repository().get_by_id(id).await? else {
            return Ok(None);
        };
        if !order.status.is_cancellable() {
            warn!(order_id = %id, status = %order.status, "Cancellation rejected");
            return Err(AppError::business_rule(format!(
                "Order {} is {} and can no longer be cancelled",
                order.order_number, order.status
            )));
        }
        let items = self
            .order_items
            .get_all(&QuerySpec::new().filter(FilterField::eq("order_id", id)))
            .await?;
        for item in &items {
            self.variants.release(item.variant_id, item.quantity).await?;
        }
        order.status = OrderStatus::Cancelled;
        let cancelled = self.crud.save(order).await?;
        info!(order_id = %id, restocked_lines = items.len(), "Order cancelled");
        Ok(cancelled)
    }

    /// Moves an order to `status` along the lifecycle.
    ///
    /// Cancelling goes through [`OrderService::cancel`] so stock is returned.
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Option<OrderResponse>> {
        if status == OrderStatus::Cancelled {
            return self.cancel(id).await;
        }
        let Some(mut order) = self.crud.repository().get_by_id(id).await? else {
            return Ok(None);
        };
        let from = order.status;
        if !from.can_transition_to(status) {
            warn!(order_id = %id, %from, to = %status, "Illegal status transition");
            return Err(AppError::business_rule(format!(
                "Order {} cannot move from {from} to {status}",
                order.order_number
            )));
        }
        order.status = status;
        let updated = self.crud.save(order).await?;
        info!(order_id = %id, %from, to = %status, "Order status changed");
        Ok(updated)
    }

    /// Applies a partial update (notes only).
    pub async fn update(&self, id: Uuid, req: UpdateOrderRequest) -> AppResult<Option<OrderResponse>> {
        self.crud.update(id, req).await
    }

    /// An order with its lines and payments.
    pub async fn details(&self, id: Uuid) -> AppResult<Option<OrderResponse>> {
        self.crud.get_by_id(id, &Self::detail_includes()).await
    }

    /// Looks up an order by its number, with lines and payments.
    pub async fn get_by_number(&self, order_number: &str) -> AppResult<Option<OrderResponse>> {
        let mut spec = QuerySpec::new().filter(FilterField::eq("order_number", order_number.trim()));
        spec.includes = Self::detail_includes();
        self.crud.find(&spec).await
    }

    /// A user's orders, newest first.
    pub async fn list_for_user(&self, user_id: Uuid, page: &PageRequest) -> AppResult<PageResponse<OrderResponse>> {
        self.crud
            .get_paged(
                page,
                &QuerySpec::new()
                    .filter(FilterField::eq("user_id", user_id))
                    .sort(SortField::desc("created_at")),
            )
            .await
    }

    /// All orders, newest first, optionally restricted to one status.
    pub async fn list(&self, status: Option<OrderStatus>, page: &PageRequest) -> AppResult<PageResponse<OrderResponse>> {
        self.crud
            .get_paged(
                page,
                &QuerySpec::new()
                    .filter_opt(status.map(|s| FilterField::eq("status", s.as_str())))
                    .sort(SortField::desc("created_at")),
            )
            .await
    }

    fn detail_includes() -> Vec<String> {
        DETAIL_INCLUDES.iter().map(|s| s.to_string()).collect()
    }

    async fn shipping_address(&self, user: &User, requested: Option<Uuid>) -> AppResult<Address> {
        match requested {
            Some(id) => self
                .addresses
                .get_by_id(id)
                .await?
                .filter(|a| a.user_id == user.audit.id)
                .ok_or_else(|| AppError::not_found(format!("Address {id} not found"))),
            None => self
                .addresses
                .find(
                    &QuerySpec::new()
                        .filter(FilterField::eq("user_id", user.audit.id))
                        .filter(FilterField::eq("is_default", true)),
                )
                .await?
                .ok_or_else(|| AppError::business_rule("A shipping address is required to place an order")),
        }
    }

    async fn reserve_stock(&self, cart: &CartSummary) -> AppResult<()> {
        for (index, line) in cart.lines.iter().enumerate() {
            if let Err(e) = self.variants.reserve(line.variant_id, line.quantity).await {
                for reserved in &cart.lines[..index] {
                    if let Err(release) = self.variants.release(reserved.variant_id, reserved.quantity).await {
                        warn!(variant_id = %reserved.variant_id, error = %release, "Stock release failed");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    async fn release_stock(&self, cart: &CartSummary) {
        for line in &cart.lines {
            if let Err(e) = self.variants.release(line.variant_id, line.quantity).await {
                warn!(variant_id = %line.variant_id, error = %e, "Stock release failed");
            }
        }
    }

    /// Reverts a checkout that failed after stock was reserved: the stock
    /// and coupon use are given back, and any order rows written so far are
    /// soft-deleted. Failures here are logged, not returned.
    async fn unwind_checkout(
        &self,
        cart: &CartSummary,
        coupon_code: Option<&str>,
        order: Option<&Order>,
        item_ids: &[Uuid],
    ) {
        self.release_stock(cart).await;
        if let Some(code) = coupon_code {
            if let Err(e) = self.coupons.release(code).await {
                warn!(code, error = %e, "Coupon release failed");
            }
        }
        let Some(order) = order else {
            return;
        };
        if !item_ids.is_empty() {
            if let Err(e) = self.order_items.soft_delete_range(item_ids).await {
                warn!(order_id = %order.audit.id, error = %e, "Order line rollback failed");
            }
        }
        if let Err(e) = self.crud.repository().soft_delete(order.audit.id).await {
            warn!(order_id = %order.audit.id, error = %e, "Order rollback failed");
        }
        warn!(order_id = %order.audit.id, order_number = %order.order_number, "Checkout rolled back");
    }

    async fn send_confirmation(&self, user: &User, order: &Order) {
        let subject = format!("Your order {} has been received", order.order_number);
        let body = format!(
            "Hi {},\n\nThanks for your order {}.\nSubtotal: {} {}\nDiscount: {} {}\nShipping: {} {}\nTotal: {} {}\n",
            user.first_name,
            order.order_number,
            order.subtotal,
            self.store.currency,
            order.discount_amount,
            self.store.currency,
            order.shipping_fee,
            self.store.currency,
            order.total_amount,
            self.store.currency,
        );
        if let Err(e) = self.email.send(&user.email, &subject, &body).await {
            warn!(order_id = %order.audit.id, error = %e, "Order confirmation email failed");
        }
    }
}

impl Service for OrderService {}
