//! `storefront migrate`: schema management.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_database::migration::{migration_status, run_migrations};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub command: MigrateCommand,
}

#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Apply pending migrations
    Run,
    /// List embedded migrations and whether each is applied
    Status,
}

#[derive(Serialize, Tabled)]
struct MigrationRow {
    version: i64,
    description: String,
    applied: bool,
}

pub async fn execute(
    args: &MigrateArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let pool = super::create_db_pool(config).await?;

    let result = match &args.command {
        MigrateCommand::Run => run_migrations(pool.pool())
            .await
            .map(|()| output::print_success("Schema is up to date.")),
        MigrateCommand::Status => {
            migration_status(pool.pool()).await.map(|states| {
                let pending = states.iter().filter(|s| !s.applied).count();
                let rows: Vec<MigrationRow> = states
                    .into_iter()
                    .map(|s| MigrationRow {
                        version: s.version,
                        description: s.description,
                        applied: s.applied,
                    })
                    .collect();
                output::print_list(&rows, format);
                if pending > 0 {
                    output::print_warning(&format!("{pending} migration(s) pending."));
                }
            })
        }
    };

    pool.close().await;
    result
}
