//! Data seeder binary: populates the `dm_operations` tables with
//! synthetic rows and prints a summary.
//!
//! Run with: cargo run --bin seed-data -- [--inventory N] [--sales N] [--orders N]

use anyhow::Result;
use clap::Parser;
use dm_operations::{
    config::DatabaseConfig,
    db,
    seed::{self, SeedCounts},
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "seed-data",
    about = "Populate the dm_operations schema with synthetic demo data"
)]
struct Cli {
    /// Number of inventory rows to generate
    #[arg(long, default_value_t = 500)]
    inventory: usize,

    /// Number of sales rows to generate
    #[arg(long, default_value_t = 500)]
    sales: usize,

    /// Number of pending orders to generate
    #[arg(long, default_value_t = 500)]
    orders: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let counts = SeedCounts {
        inventory: cli.inventory,
        sales: cli.sales,
        orders: cli.orders,
    };

    info!("Starting to populate the database...");

    let config = DatabaseConfig::load()?;
    let db = db::connect(&config.connection_url()).await?;

    let result = seed::seed(&db, counts).await;
    match &result {
        Ok(summary) => {
            info!("Database Summary:");
            info!("Total Inventory Items: {}", summary.inventory_items);
            info!("Total Sales Records: {}", summary.sales_records);
            info!("Pending Orders: {}", summary.pending_orders);
            info!("YTD Sales: ${}", summary.ytd_sales.round_dp(2));
        }
        Err(e) => {
            error!("Error while populating tables: {}", e);
        }
    }

    // Release runs on success and failure alike.
    db::release(db).await;

    result.map(|_| ()).map_err(Into::into)
}
