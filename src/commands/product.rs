//! Product catalog commands.

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_core::types::PageRequest;
use storefront_service::Services;
use storefront_service::product::{ProductResponse, ProductSearch};

/// Relations shown by `product show`.
const SHOW_INCLUDES: [&str; 3] = ["variants", "brand", "category"];

/// Arguments for product commands
#[derive(Debug, Args)]
pub struct ProductArgs {
    /// Product subcommand
    #[command(subcommand)]
    pub command: ProductCommand,
}

/// Product subcommands
#[derive(Debug, Subcommand)]
pub enum ProductCommand {
    /// Search the catalog
    List {
        /// Name contains (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,
        /// Brand slug
        #[arg(short, long)]
        brand: Option<String>,
        /// Category ID
        #[arg(long)]
        category: Option<Uuid>,
        /// Lowest base price
        #[arg(long)]
        min_price: Option<Decimal>,
        /// Highest base price
        #[arg(long)]
        max_price: Option<Decimal>,
        /// Sort expression, e.g. `base_price:desc`
        #[arg(short, long)]
        sort: Option<String>,
        /// Include deactivated products
        #[arg(long)]
        all: bool,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Page size
        #[arg(long, default_value_t = 20)]
        page_size: u64,
    },
    /// Show a product with its variants
    Show {
        /// Product ID or slug
        product: String,
    },
    /// Permanently delete a product
    Purge {
        /// Product ID
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// Product display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ProductRow {
    /// Product ID
    id: String,
    /// Name
    name: String,
    /// Slug
    slug: String,
    /// Base price
    price: String,
    /// Active
    active: bool,
}

impl From<&ProductResponse> for ProductRow {
    fn from(product: &ProductResponse) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: product.base_price.to_string(),
            active: product.is_active,
        }
    }
}

/// Execute product commands
pub async fn execute(args: &ProductArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (services, _) = super::create_services(config).await?;

    match &args.command {
        ProductCommand::List {
            name,
            brand,
            category,
            min_price,
            max_price,
            sort,
            all,
            page,
            page_size,
        } => {
            let brand_id = match brand {
                Some(slug) => Some(
                    services
                        .brands
                        .get_by_slug(slug, &[])
                        .await?
                        .ok_or_else(|| AppError::not_found(format!("Brand '{slug}' not found")))?
                        .id,
                ),
                None => None,
            };
            let search = ProductSearch {
                name: name.clone(),
                brand_id,
                category_id: *category,
                min_price: *min_price,
                max_price: *max_price,
                sort: sort.clone(),
                include_inactive: *all,
                includes: Vec::new(),
            };
            let results = services
                .products
                .search(&search, &PageRequest::try_new(*page, *page_size)?)
                .await?;
            let rows: Vec<ProductRow> = results.items.iter().map(ProductRow::from).collect();
            output::print_page(&results, &rows, format);
        }
        ProductCommand::Show { product } => {
            let found = find_product(&services, product).await?;
            let found = found.ok_or_else(|| AppError::not_found(format!("Product '{product}' not found")))?;
            if format == OutputFormat::Table {
                output::print_kv("Name", &found.name);
                output::print_kv("Slug", &found.slug);
                output::print_kv("Base price", &found.base_price.to_string());
                if let Some(brand) = &found.brand {
                    output::print_kv("Brand", &brand.name);
                }
                if let Some(category) = &found.category {
                    output::print_kv("Category", &category.name);
                }
                for variant in found.variants.iter().flatten() {
                    output::print_kv(
                        &variant.sku,
                        &format!(
                            "{} / {}  {}  stock {}",
                            variant.size.as_deref().unwrap_or("-"),
                            variant.color.as_deref().unwrap_or("-"),
                            variant.price,
                            variant.stock_quantity
                        ),
                    );
                }
            } else {
                output::print_item(&found, format);
            }
        }
        ProductCommand::Purge { id, force } => {
            let prompt = format!("Permanently delete product {id}? This cannot be undone");
            if !super::confirm(&prompt, *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            if services.products.crud().purge(*id).await? {
                output::print_success(&format!("Product {id} purged"));
            } else {
                output::print_warning(&format!("Product {id} not found"));
            }
        }
    }

    Ok(())
}

async fn find_product(services: &Services, key: &str) -> Result<Option<ProductResponse>, AppError> {
    let includes: Vec<String> = SHOW_INCLUDES.iter().map(|s| s.to_string()).collect();
    match key.parse::<Uuid>() {
        Ok(id) => services.products.crud().get_by_id(id, &includes).await,
        Err(_) => services.products.get_by_slug(key, &includes).await,
    }
}
