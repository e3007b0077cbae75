//! Data seeder: fills the three tables with synthetic rows and reads a
//! summary back. All inserts for a run happen inside one transaction with
//! a single commit at the end, so a mid-run failure discards the whole
//! batch.

pub mod generator;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect, Set, Statement, TransactionTrait,
};
use tracing::{debug, info};

use crate::entities::{inventory, order, sale, OrderStatus};
use crate::errors::OpsError;
use generator::SkuRegistry;

/// Progress is reported every this many generated rows.
const PROGRESS_INTERVAL: usize = 50;

/// Target row counts for one seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedCounts {
    pub inventory: usize,
    pub sales: usize,
    pub orders: usize,
}

impl Default for SeedCounts {
    fn default() -> Self {
        Self {
            inventory: 500,
            sales: 500,
            orders: 500,
        }
    }
}

/// Post-commit summary read back from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub inventory_items: u64,
    pub sales_records: u64,
    pub pending_orders: u64,
    /// Sum of sales revenue for the current calendar year.
    pub ytd_sales: Decimal,
}

/// Seeds the three tables with freshly drawn randomness.
pub async fn seed(db: &DatabaseConnection, counts: SeedCounts) -> Result<SeedSummary, OpsError> {
    let mut rng = StdRng::from_entropy();
    seed_with_rng(db, counts, &mut rng).await
}

/// Seeds the three tables using the caller's `rng`, then commits once and
/// reads the summary back.
///
/// Dependent rows reference inventory ids read back from the table after
/// the inventory inserts, sampled uniformly with replacement. Asking for
/// sales or orders when no inventory rows exist to reference is rejected
/// as [`OpsError::InvalidInput`].
pub async fn seed_with_rng<R: Rng + ?Sized>(
    db: &DatabaseConnection,
    counts: SeedCounts,
    rng: &mut R,
) -> Result<SeedSummary, OpsError> {
    let txn = db.begin().await?;

    // Fresh registry per invocation keeps runs independent.
    let mut skus = SkuRegistry::new();
    let now = Utc::now().naive_utc();
    let today = Utc::now().date_naive();

    info!("Generating {} inventory records...", counts.inventory);
    for i in 0..counts.inventory {
        if i % PROGRESS_INTERVAL == 0 {
            info!("Processed {} inventory records...", i);
        }
        let product = generator::paper_product(rng, &mut skus, now);
        let row = inventory::ActiveModel {
            sku: Set(product.sku),
            product_name: Set(product.product_name),
            category_name: Set(product.category_name),
            location_name: Set(product.location_name),
            current_stock: Set(product.current_stock),
            unit_weight_lbs: Set(Some(product.unit_weight_lbs)),
            unit_price: Set(product.unit_price),
            reorder_point: Set(product.reorder_point),
            reorder_quantity: Set(product.reorder_quantity),
            paper_weight_gsm: Set(Some(product.paper_weight_gsm)),
            sheet_size: Set(Some(product.sheet_size)),
            sheets_per_ream: Set(Some(product.sheets_per_ream)),
            brightness: Set(Some(product.brightness)),
            is_recycled: Set(Some(product.is_recycled)),
            last_restock_date: Set(Some(product.last_restock_date)),
            status: Set(Some(product.status.to_string())),
            ..Default::default()
        };
        let inserted = row.insert(&txn).await?;
        debug!(inventory_id = inserted.inventory_id, "inserted inventory row");
    }

    // Sales and orders reference only ids present in the table.
    let inventory_ids: Vec<i32> = inventory::Entity::find()
        .select_only()
        .column(inventory::Column::InventoryId)
        .into_tuple()
        .all(&txn)
        .await?;

    if inventory_ids.is_empty() && (counts.sales > 0 || counts.orders > 0) {
        return Err(OpsError::InvalidInput(
            "cannot seed sales or orders without inventory rows to reference".to_string(),
        ));
    }

    info!("Generating {} sales records...", counts.sales);
    for i in 0..counts.sales {
        if i % PROGRESS_INTERVAL == 0 {
            info!("Processed {} sales records...", i);
        }
        let draw = generator::sale(rng, today);
        let row = sale::ActiveModel {
            inventory_id: Set(Some(inventory_ids[rng.gen_range(0..inventory_ids.len())])),
            sale_date: Set(draw.sale_date),
            quantity: Set(draw.quantity),
            unit_price: Set(draw.unit_price),
            total_amount: Set(draw.total_amount),
            customer_name: Set(Some(draw.customer_name)),
            location_name: Set(draw.location_name),
            ..Default::default()
        };
        row.insert(&txn).await?;
    }

    info!("Generating {} pending orders...", counts.orders);
    for i in 0..counts.orders {
        if i % PROGRESS_INTERVAL == 0 {
            info!("Processed {} orders...", i);
        }
        let draw = generator::purchase_order(rng, today);
        let row = order::ActiveModel {
            inventory_id: Set(Some(inventory_ids[rng.gen_range(0..inventory_ids.len())])),
            order_date: Set(draw.order_date),
            quantity: Set(draw.quantity),
            unit_price: Set(draw.unit_price),
            total_amount: Set(draw.total_amount),
            customer_name: Set(Some(draw.customer_name)),
            status: Set(Some(draw.status.to_string())),
            expected_delivery_date: Set(Some(draw.expected_delivery_date)),
            location_name: Set(draw.location_name),
            ..Default::default()
        };
        row.insert(&txn).await?;
    }

    txn.commit().await?;
    info!("All tables populated successfully!");

    summarize(db).await
}

/// Runs the four summary read queries against committed state.
pub async fn summarize(db: &DatabaseConnection) -> Result<SeedSummary, OpsError> {
    let inventory_items = inventory::Entity::find().count(db).await?;
    let sales_records = sale::Entity::find().count(db).await?;
    let pending_orders = order::Entity::find()
        .filter(order::Column::Status.eq(OrderStatus::Pending.to_string()))
        .count(db)
        .await?;

    let ytd_sql = "SELECT SUM(total_amount) AS ytd_sales FROM dm_operations.sales \
                   WHERE EXTRACT(YEAR FROM sale_date) = EXTRACT(YEAR FROM CURRENT_DATE)";
    let row = db
        .query_one(Statement::from_string(
            DbBackend::Postgres,
            ytd_sql.to_string(),
        ))
        .await?;
    let ytd_sales = match row {
        Some(row) => row
            .try_get::<Option<Decimal>>("", "ytd_sales")?
            .unwrap_or_default(),
        None => Decimal::ZERO,
    };

    Ok(SeedSummary {
        inventory_items,
        sales_records,
        pending_orders,
        ytd_sales,
    })
}
