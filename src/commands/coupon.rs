//! Coupon commands.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_core::types::{QuerySpec, SortField};
use storefront_entity::coupon::DiscountType;
use storefront_service::RequestContext;
use storefront_service::coupon::{CouponResponse, CreateCouponRequest};

/// Arguments for coupon commands
#[derive(Debug, Args)]
pub struct CouponArgs {
    /// Coupon subcommand
    #[command(subcommand)]
    pub command: CouponCommand,
}

/// Coupon subcommands
#[derive(Debug, Subcommand)]
pub enum CouponCommand {
    /// Create a coupon
    Create {
        /// Redemption code
        code: String,
        /// `percentage` or `fixed_amount`
        #[arg(short = 't', long = "type")]
        discount_type: DiscountType,
        /// Percent or amount off
        #[arg(short, long)]
        value: Decimal,
        /// First valid day (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last valid day (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Minimum order amount
        #[arg(long)]
        min_order: Option<Decimal>,
        /// Maximum discount
        #[arg(long)]
        max_discount: Option<Decimal>,
        /// Total redemptions allowed
        #[arg(long)]
        limit: Option<i32>,
        /// Description shown to customers
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List coupons
    List,
    /// Check a coupon against an order amount
    Validate {
        /// Redemption code
        code: String,
        /// Order amount
        amount: Decimal,
        /// Evaluate on this day instead of now (YYYY-MM-DD)
        #[arg(long)]
        on: Option<NaiveDate>,
    },
}

/// Coupon display row for table output
#[derive(Debug, Serialize, Tabled)]
struct CouponRow {
    /// Code
    code: String,
    /// Discount
    discount: String,
    /// Valid from
    valid_from: String,
    /// Valid to
    valid_to: String,
    /// Used
    used: String,
    /// Active
    active: bool,
}

impl From<&CouponResponse> for CouponRow {
    fn from(coupon: &CouponResponse) -> Self {
        let discount = match coupon.discount_type {
            DiscountType::Percentage => format!("{}%", coupon.discount_value),
            DiscountType::FixedAmount => coupon.discount_value.to_string(),
        };
        let used = match coupon.usage_limit {
            Some(limit) => format!("{}/{limit}", coupon.used_count),
            None => coupon.used_count.to_string(),
        };
        Self {
            code: coupon.code.clone(),
            discount,
            valid_from: coupon.valid_from.format("%Y-%m-%d").to_string(),
            valid_to: coupon.valid_to.format("%Y-%m-%d").to_string(),
            used,
            active: coupon.is_active,
        }
    }
}

/// Execute coupon commands
pub async fn execute(args: &CouponArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (services, _) = super::create_services(config).await?;

    match &args.command {
        CouponCommand::Create {
            code,
            discount_type,
            value,
            from,
            to,
            min_order,
            max_discount,
            limit,
            description,
        } => {
            let request = CreateCouponRequest {
                code: code.clone(),
                description: description.clone(),
                discount_type: *discount_type,
                discount_value: *value,
                minimum_order_amount: *min_order,
                maximum_discount_amount: *max_discount,
                valid_from: start_of(*from)?,
                valid_to: end_of(*to)?,
                usage_limit: *limit,
            };
            let coupon = services.coupons.create(&RequestContext::system(), request).await?;
            output::print_success(&format!("Coupon '{}' created", coupon.code));
            if format == OutputFormat::Json {
                output::print_item(&coupon, format);
            }
        }
        CouponCommand::List => {
            let coupons = services
                .coupons
                .crud()
                .get_all(&QuerySpec::new().sort(SortField::desc("valid_to")))
                .await?;
            let rows: Vec<CouponRow> = coupons.iter().map(CouponRow::from).collect();
            output::print_list(&rows, format);
        }
        CouponCommand::Validate { code, amount, on } => {
            let now = match on {
                Some(day) => start_of(*day)?,
                None => Utc::now(),
            };
            let result = services.coupons.validate(code, *amount, now).await?;
            if format == OutputFormat::Json {
                output::print_item(&result, format);
            } else {
                output::print_kv("Code", &result.code);
                output::print_kv("Valid", &result.is_valid.to_string());
                if let Some(reason) = result.reason {
                    output::print_kv("Reason", reason.as_str());
                }
                output::print_kv("Discount", &result.discount_amount.to_string());
                output::print_kv("Final amount", &result.final_amount.to_string());
            }
        }
    }

    Ok(())
}

fn start_of(day: NaiveDate) -> Result<DateTime<Utc>, AppError> {
    day.and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .ok_or_else(|| AppError::validation(format!("Invalid date {day}")))
}

/// The last instant of `day` that PostgreSQL can store (microsecond precision).
fn end_of(day: NaiveDate) -> Result<DateTime<Utc>, AppError> {
    day.and_hms_micro_opt(23, 59, 59, 999_999)
        .map(|t| t.and_utc())
        .ok_or_else(|| AppError::validation(format!("Invalid date {day}")))
}
