use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;

use crate::catalog::CatalogSource;

/// Initializes the application configuration
/// Returns the configured catalog source
pub fn init_app_config() -> color_eyre::eyre::Result<CatalogSource> {
    // Load environment variables from .env file
    dotenv().ok();

    let location = env::var("CATALOG_SOURCE").unwrap_or_else(|_| "data/catalog.json".to_string());
    if location.trim().is_empty() {
        return Err(eyre!("CATALOG_SOURCE is set but empty"));
    }

    Ok(CatalogSource::parse(&location))
}

/// Whether debug diagnostics were requested via the environment
pub fn debug_enabled() -> bool {
    env::var("DEBUG").is_ok_and(|value| value != "0")
}
