//! Schema initializer binary: drops and recreates the `dm_operations`
//! tables and views.
//!
//! Run with: cargo run --bin init-schema

use anyhow::Result;
use dm_operations::{config::DatabaseConfig, db, schema};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting database setup...");

    let config = DatabaseConfig::load()?;
    let db = db::connect(&config.connection_url()).await?;

    let result = schema::initialize(&db).await;
    if let Err(e) = &result {
        error!("Error while creating tables and views: {}", e);
    }

    // Release runs on success and failure alike.
    db::release(db).await;

    result.map_err(Into::into)
}
