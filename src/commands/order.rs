//! Order commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_core::types::PageRequest;
use storefront_entity::order::OrderStatus;
use storefront_service::order::OrderResponse;

/// Arguments for order commands
#[derive(Debug, Args)]
pub struct OrderArgs {
    /// Order subcommand
    #[command(subcommand)]
    pub command: OrderCommand,
}

/// Order subcommands
#[derive(Debug, Subcommand)]
pub enum OrderCommand {
    /// List orders, newest first
    List {
        /// Only orders of this customer
        #[arg(short, long)]
        user: Option<Uuid>,
        /// Only orders in this status
        #[arg(short, long)]
        status: Option<OrderStatus>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 20)]
        page_size: u64,
    },
    /// Show an order with its lines and payments
    Show {
        /// Order ID or order number
        order: String,
    },
}

/// Order display row for table output
#[derive(Debug, Serialize, Tabled)]
struct OrderRow {
    /// Order number
    number: String,
    /// Status
    status: String,
    /// Total
    total: String,
    /// Placed at
    placed_at: String,
}

impl From<&OrderResponse> for OrderRow {
    fn from(order: &OrderResponse) -> Self {
        Self {
            number: order.order_number.clone(),
            status: order.status.to_string(),
            total: order.total_amount.to_string(),
            placed_at: order.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Order line display row
#[derive(Debug, Serialize, Tabled)]
struct LineRow {
    /// SKU
    sku: String,
    /// Product
    product: String,
    /// Quantity
    quantity: i32,
    /// Unit price
    unit_price: String,
    /// Line total
    line_total: String,
}

/// Execute order commands
pub async fn execute(args: &OrderArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (services, _) = super::create_services(config).await?;

    match &args.command {
        OrderCommand::List {
            user,
            status,
            page,
            page_size,
        } => {
            let page = PageRequest::try_new(*page, *page_size)?;
            let orders = match user {
                Some(user_id) => {
                    if status.is_some() {
                        output::print_warning("--status is ignored when --user is given");
                    }
                    services.orders.list_for_user(*user_id, &page).await?
                }
                None => services.orders.list(*status, &page).await?,
            };
            let rows: Vec<OrderRow> = orders.items.iter().map(OrderRow::from).collect();
            output::print_page(&orders, &rows, format);
        }
        OrderCommand::Show { order } => {
            let found = match order.parse::<Uuid>() {
                Ok(id) => services.orders.details(id).await?,
                Err(_) => services.orders.get_by_number(order).await?,
            };
            let found = found.ok_or_else(|| AppError::not_found(format!("Order '{order}' not found")))?;

            if format == OutputFormat::Json {
                output::print_item(&found, format);
                return Ok(());
            }
            output::print_kv("Order", &found.order_number);
            output::print_kv("Status", found.status.as_str());
            output::print_kv("Subtotal", &found.subtotal.to_string());
            output::print_kv("Discount", &found.discount_amount.to_string());
            output::print_kv("Shipping", &found.shipping_fee.to_string());
            output::print_kv("Total", &found.total_amount.to_string());
            let lines: Vec<LineRow> = found
                .items
                .iter()
                .flatten()
                .map(|item| LineRow {
                    sku: item.sku.clone(),
                    product: item.product_name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price.to_string(),
                    line_total: item.line_total.to_string(),
                })
                .collect();
            output::print_list(&lines, format);
            for payment in found.payments.iter().flatten() {
                output::print_kv(
                    &format!("Payment {}", payment.method),
                    &format!("{} ({})", payment.amount, payment.status),
                );
            }
        }
    }

    Ok(())
}
