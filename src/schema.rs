//! Schema initializer: idempotent full reset of the `dm_operations`
//! namespace. Drops the reporting views, then the tables (children before
//! parents), then recreates everything, all inside one transaction.

use crate::errors::OpsError;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::info;

/// Target namespace for all tables and views.
pub const SCHEMA_NAME: &str = "dm_operations";

/// Fixed reference date used by the windowed views. The views window on
/// this literal instead of the live clock so their output is reproducible
/// regardless of when they are queried. Must stay a literal in the view
/// SQL; substituting a dynamic "now" changes query results.
pub const ANCHOR_TIMESTAMP: &str = "2025-01-17 00:00:00+00";

const CREATE_SCHEMA: &str = "CREATE SCHEMA IF NOT EXISTS dm_operations;";

// Views depend on tables, so they go first; orders/sales reference
// inventory, so the parent table goes last.
const DROP_VIEWS: [&str; 3] = [
    "DROP VIEW IF EXISTS dm_operations.pending_orders;",
    "DROP VIEW IF EXISTS dm_operations.sales_velocity;",
    "DROP VIEW IF EXISTS dm_operations.inventory_location_status;",
];

const DROP_TABLES: [&str; 3] = [
    "DROP TABLE IF EXISTS dm_operations.orders;",
    "DROP TABLE IF EXISTS dm_operations.sales;",
    "DROP TABLE IF EXISTS dm_operations.inventory;",
];

const CREATE_INVENTORY_TABLE: &str = r#"
    CREATE TABLE dm_operations.inventory (
        inventory_id SERIAL PRIMARY KEY,
        sku VARCHAR(50) UNIQUE NOT NULL,
        product_name VARCHAR(200) NOT NULL,
        category_name VARCHAR(100) NOT NULL,
        location_name VARCHAR(100) NOT NULL,
        current_stock INTEGER NOT NULL DEFAULT 0,
        unit_weight_lbs DECIMAL(5,2),
        unit_price DECIMAL(10,2) NOT NULL,
        reorder_point INTEGER NOT NULL,
        reorder_quantity INTEGER NOT NULL,
        paper_weight_gsm INTEGER,
        sheet_size VARCHAR(50),
        sheets_per_ream INTEGER DEFAULT 500,
        brightness INTEGER,
        is_recycled BOOLEAN DEFAULT false,
        last_restock_date TIMESTAMP,
        status VARCHAR(20) CHECK (status IN ('In Stock', 'Low Stock', 'Out of Stock', 'Discontinued')),
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
"#;

const CREATE_SALES_TABLE: &str = r#"
    CREATE TABLE dm_operations.sales (
        sale_id SERIAL PRIMARY KEY,
        inventory_id INTEGER REFERENCES dm_operations.inventory(inventory_id),
        sale_date DATE NOT NULL,
        quantity INTEGER NOT NULL,
        unit_price DECIMAL(10,2) NOT NULL,
        total_amount DECIMAL(10,2) NOT NULL,
        customer_name VARCHAR(200),
        location_name VARCHAR(100) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
"#;

const CREATE_ORDERS_TABLE: &str = r#"
    CREATE TABLE dm_operations.orders (
        order_id SERIAL PRIMARY KEY,
        inventory_id INTEGER REFERENCES dm_operations.inventory(inventory_id),
        order_date DATE NOT NULL,
        quantity INTEGER NOT NULL,
        unit_price DECIMAL(10,2) NOT NULL,
        total_amount DECIMAL(10,2) NOT NULL,
        customer_name VARCHAR(200),
        status VARCHAR(50) CHECK (status IN ('Pending', 'Processing', 'Shipped', 'Delivered', 'Cancelled')),
        expected_delivery_date DATE,
        location_name VARCHAR(100) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    );
"#;

// Stock level per item and location, classified against the reorder point.
const CREATE_INVENTORY_LOCATION_STATUS_VIEW: &str = r#"
    CREATE OR REPLACE VIEW dm_operations.inventory_location_status AS
    SELECT
        i.inventory_id, i.sku, i.product_name, i.category_name,
        i.location_name, i.current_stock, i.reorder_point, i.reorder_quantity,
        i.unit_price, i.unit_weight_lbs,
        (i.current_stock - i.reorder_point) AS stock_margin,
        CASE
            WHEN i.current_stock <= i.reorder_point THEN 'Below Reorder Point'
            WHEN i.current_stock <= (i.reorder_point * 1.2) THEN 'Near Reorder Point'
            ELSE 'Adequate Stock'
        END AS stock_status
    FROM dm_operations.inventory i;
"#;

// Fixed 90-day window ending at the anchor timestamp, never the live clock.
const CREATE_SALES_VELOCITY_VIEW: &str = r#"
    CREATE OR REPLACE VIEW dm_operations.sales_velocity AS
    SELECT
        inventory_id, location_name,
        COUNT(sale_id) AS num_sales,
        SUM(quantity) AS total_quantity_sold,
        SUM(total_amount) AS total_revenue,
        SUM(quantity) / 90.0 AS daily_velocity
    FROM dm_operations.sales
    WHERE sale_date >= '2025-01-17 00:00:00+00'::timestamp - INTERVAL '90 days'
      AND sale_date <= '2025-01-17 00:00:00+00'::timestamp
    GROUP BY inventory_id, location_name;
"#;

// Fixed 30-day window ending at the anchor, restricted to orders still due
// on or after it.
const CREATE_PENDING_ORDERS_VIEW: &str = r#"
    CREATE OR REPLACE VIEW dm_operations.pending_orders AS
    SELECT
        inventory_id, location_name,
        COUNT(order_id) AS num_orders,
        SUM(quantity) AS total_quantity_ordered
    FROM dm_operations.orders
    WHERE order_date >= '2025-01-17 00:00:00+00'::timestamp - INTERVAL '30 days'
      AND order_date <= '2025-01-17 00:00:00+00'::timestamp
      AND expected_delivery_date >= '2025-01-17 00:00:00+00'::timestamp
    GROUP BY inventory_id, location_name;
"#;

/// Full reset sequence in execution order.
pub fn reset_statements() -> Vec<&'static str> {
    let mut statements = vec![CREATE_SCHEMA];
    statements.extend(DROP_VIEWS);
    statements.extend(DROP_TABLES);
    statements.extend([
        CREATE_INVENTORY_TABLE,
        CREATE_SALES_TABLE,
        CREATE_ORDERS_TABLE,
        CREATE_INVENTORY_LOCATION_STATUS_VIEW,
        CREATE_SALES_VELOCITY_VIEW,
        CREATE_PENDING_ORDERS_VIEW,
    ]);
    statements
}

/// Drops and recreates the schema objects as one transaction. Any
/// statement failure rolls the whole reset back; running it twice in a
/// row leaves the same empty-tables state.
pub async fn initialize(db: &DatabaseConnection) -> Result<(), OpsError> {
    let txn = db.begin().await?;

    txn.execute_unprepared(CREATE_SCHEMA).await?;

    info!("Dropping existing views if they exist...");
    for stmt in DROP_VIEWS {
        txn.execute_unprepared(stmt).await?;
    }

    info!("Dropping existing tables if they exist...");
    for stmt in DROP_TABLES {
        txn.execute_unprepared(stmt).await?;
    }

    info!("Creating inventory table...");
    txn.execute_unprepared(CREATE_INVENTORY_TABLE).await?;
    info!("Creating sales table...");
    txn.execute_unprepared(CREATE_SALES_TABLE).await?;
    info!("Creating orders table...");
    txn.execute_unprepared(CREATE_ORDERS_TABLE).await?;

    info!("Creating inventory_location_status view...");
    txn.execute_unprepared(CREATE_INVENTORY_LOCATION_STATUS_VIEW)
        .await?;
    info!("Creating sales_velocity view...");
    txn.execute_unprepared(CREATE_SALES_VELOCITY_VIEW).await?;
    info!("Creating pending_orders view...");
    txn.execute_unprepared(CREATE_PENDING_ORDERS_VIEW).await?;

    txn.commit().await?;
    info!("All tables and views created successfully!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(statements: &[&str], needle: &str) -> usize {
        statements
            .iter()
            .position(|s| s.contains(needle))
            .unwrap_or_else(|| panic!("no statement containing {needle:?}"))
    }

    #[test]
    fn views_drop_before_tables_and_children_before_parents() {
        let stmts = reset_statements();
        let drop_pending = position(&stmts, "DROP VIEW IF EXISTS dm_operations.pending_orders");
        let drop_velocity = position(&stmts, "DROP VIEW IF EXISTS dm_operations.sales_velocity");
        let drop_status = position(
            &stmts,
            "DROP VIEW IF EXISTS dm_operations.inventory_location_status",
        );
        let drop_orders = position(&stmts, "DROP TABLE IF EXISTS dm_operations.orders");
        let drop_sales = position(&stmts, "DROP TABLE IF EXISTS dm_operations.sales");
        let drop_inventory = position(&stmts, "DROP TABLE IF EXISTS dm_operations.inventory");

        assert!(drop_pending < drop_velocity && drop_velocity < drop_status);
        assert!(drop_status < drop_orders);
        assert!(drop_orders < drop_sales && drop_sales < drop_inventory);
    }

    #[test]
    fn parent_table_created_before_children_and_views_last() {
        let stmts = reset_statements();
        let create_inventory = position(&stmts, "CREATE TABLE dm_operations.inventory");
        let create_sales = position(&stmts, "CREATE TABLE dm_operations.sales");
        let create_orders = position(&stmts, "CREATE TABLE dm_operations.orders");
        let create_first_view = position(&stmts, "CREATE OR REPLACE VIEW");

        assert!(create_inventory < create_sales && create_sales < create_orders);
        assert!(create_orders < create_first_view);
    }

    #[test]
    fn schema_creation_comes_first() {
        let stmts = reset_statements();
        assert!(stmts[0].contains("CREATE SCHEMA IF NOT EXISTS dm_operations"));
    }

    #[test]
    fn windowed_views_use_the_literal_anchor() {
        assert_eq!(CREATE_SALES_VELOCITY_VIEW.matches(ANCHOR_TIMESTAMP).count(), 2);
        assert_eq!(CREATE_PENDING_ORDERS_VIEW.matches(ANCHOR_TIMESTAMP).count(), 3);
        assert!(CREATE_SALES_VELOCITY_VIEW.contains("INTERVAL '90 days'"));
        assert!(CREATE_SALES_VELOCITY_VIEW.contains("SUM(quantity) / 90.0"));
        assert!(CREATE_PENDING_ORDERS_VIEW.contains("INTERVAL '30 days'"));
        // No view may fall back to the live clock.
        assert!(!CREATE_SALES_VELOCITY_VIEW.contains("NOW()"));
        assert!(!CREATE_SALES_VELOCITY_VIEW.contains("CURRENT_DATE"));
        assert!(!CREATE_PENDING_ORDERS_VIEW.contains("NOW()"));
        assert!(!CREATE_PENDING_ORDERS_VIEW.contains("CURRENT_DATE"));
    }

    #[test]
    fn status_check_constraints_enumerate_all_values() {
        for status in ["In Stock", "Low Stock", "Out of Stock", "Discontinued"] {
            assert!(CREATE_INVENTORY_TABLE.contains(status));
        }
        for status in ["Pending", "Processing", "Shipped", "Delivered", "Cancelled"] {
            assert!(CREATE_ORDERS_TABLE.contains(status));
        }
    }

    #[test]
    fn stock_status_classification_boundaries() {
        assert!(CREATE_INVENTORY_LOCATION_STATUS_VIEW
            .contains("WHEN i.current_stock <= i.reorder_point THEN 'Below Reorder Point'"));
        assert!(CREATE_INVENTORY_LOCATION_STATUS_VIEW
            .contains("WHEN i.current_stock <= (i.reorder_point * 1.2) THEN 'Near Reorder Point'"));
        assert!(CREATE_INVENTORY_LOCATION_STATUS_VIEW.contains("ELSE 'Adequate Stock'"));
        assert!(CREATE_INVENTORY_LOCATION_STATUS_VIEW
            .contains("(i.current_stock - i.reorder_point) AS stock_margin"));
    }
}
