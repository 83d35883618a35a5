//! CLI command definitions and dispatch.

pub mod brand;
pub mod coupon;
pub mod migrate;
pub mod order;
pub mod product;
pub mod seed;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::{self, OutputFormat};
use storefront_core::config::{AppConfig, DatabaseBackend};
use storefront_core::error::AppError;
use storefront_database::{DatabasePool, Repositories};
use storefront_service::{LogEmailSender, Services};

/// Storefront administration
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Insert reference data
    Seed,
    /// Brand catalog
    Brand(brand::BrandArgs),
    /// Product catalog
    Product(product::ProductArgs),
    /// Discount coupons
    Coupon(coupon::CouponArgs),
    /// Orders
    Order(order::OrderArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, config, self.format).await,
            Commands::Seed => seed::execute(config).await,
            Commands::Brand(args) => brand::execute(args, config, self.format).await,
            Commands::Product(args) => product::execute(args, config, self.format).await,
            Commands::Coupon(args) => coupon::execute(args, config, self.format).await,
            Commands::Order(args) => order::execute(args, config, self.format).await,
        }
    }
}

/// Helper: load configuration from file, `config/{STOREFRONT_ENV}` and the environment
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("STOREFRONT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(config_path, &env)
}

/// Helper: create database pool from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.backend != DatabaseBackend::Postgres {
        return Err(AppError::configuration(
            "This command needs database.backend = \"postgres\"",
        ));
    }
    DatabasePool::connect(&config.database).await
}

/// Helper: build the service layer over the configured backend
pub async fn create_services(config: &AppConfig) -> Result<(Services, Repositories), AppError> {
    let (repos, _pool) = Repositories::connect(&config.database).await?;
    if config.database.backend == DatabaseBackend::Memory {
        output::print_warning("Using the in-memory backend; nothing will be persisted.");
    }
    let email = Arc::new(LogEmailSender::new(config.email.clone()));
    let services = Services::new(&repos, config.store.clone(), email);
    Ok((services, repos))
}

/// Helper: ask before a destructive action unless `force` is set
pub fn confirm(prompt: &str, force: bool) -> Result<bool, AppError> {
    if force {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
