//! Brand catalog commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_service::brand::BrandResponse;

/// Arguments for brand commands
#[derive(Debug, Args)]
pub struct BrandArgs {
    /// Brand subcommand
    #[command(subcommand)]
    pub command: BrandCommand,
}

/// Brand subcommands
#[derive(Debug, Subcommand)]
pub enum BrandCommand {
    /// List active brands
    List,
}

/// Brand display row for table output
#[derive(Debug, Serialize, Tabled)]
struct BrandRow {
    /// Brand ID
    id: String,
    /// Name
    name: String,
    /// Slug
    slug: String,
    /// Created at
    created_at: String,
}

impl From<&BrandResponse> for BrandRow {
    fn from(brand: &BrandResponse) -> Self {
        Self {
            id: brand.id.to_string(),
            name: brand.name.clone(),
            slug: brand.slug.clone(),
            created_at: brand.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute brand commands
pub async fn execute(args: &BrandArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let (services, _) = super::create_services(config).await?;

    match &args.command {
        BrandCommand::List => {
            let brands = services.brands.list_active().await?;
            let rows: Vec<BrandRow> = brands.iter().map(BrandRow::from).collect();
            output::print_list(&rows, format);
        }
    }

    Ok(())
}
