//! Reference data seeding.

use crate::output;
use storefront_core::config::AppConfig;
use storefront_core::error::AppError;
use storefront_database::Repositories;
use storefront_database::seed::seed_brands;

/// Insert the reference brands that are missing
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    let (repos, pool) = Repositories::connect(&config.database).await?;
    let inserted = seed_brands(repos.brands.as_ref()).await?;

    if inserted == 0 {
        output::print_warning("Reference brands already present; nothing inserted.");
    } else {
        output::print_success(&format!("Inserted {inserted} brand(s)."));
    }

    if let Some(pool) = pool {
        pool.close().await;
    }
    Ok(())
}
