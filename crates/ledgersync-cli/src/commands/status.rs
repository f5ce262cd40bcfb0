//! `status` command: configuration and connectivity probe

use anyhow::{Context, Result};

use ledgersync_ingest::config::SyncConfig;
use ledgersync_ingest::db;

pub async fn run() -> Result<()> {
    let config = SyncConfig::load()?;

    println!("ledgersync status");
    println!(
        "  api key:   {}",
        if config.has_api_key() {
            "configured"
        } else {
            "not configured (file mode only)"
        }
    );
    println!("  api base:  {}", config.stripe.api_base);
    println!("  page size: {}", config.stripe.page_size);

    let pool = db::create_pool(&config.database)
        .await
        .context("Failed to connect to the database")?;
    db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    println!("  database:  ok");

    Ok(())
}
