use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One stocked paper product at a single location.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "dm_operations", table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub inventory_id: i32,
    #[sea_orm(unique)]
    pub sku: String,
    pub product_name: String,
    pub category_name: String,
    pub location_name: String,
    pub current_stock: i32,
    pub unit_weight_lbs: Option<Decimal>,
    pub unit_price: Decimal,
    pub reorder_point: i32,
    pub reorder_quantity: i32,
    pub paper_weight_gsm: Option<i32>,
    pub sheet_size: Option<String>,
    pub sheets_per_ream: Option<i32>,
    pub brightness: Option<i32>,
    pub is_recycled: Option<bool>,
    pub last_restock_date: Option<NaiveDateTime>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sale::Entity")]
    Sale,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Stock status stored in `inventory.status`. The seeder only ever writes
/// the first two; the schema also accepts the last two.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
pub enum InventoryStatus {
    #[strum(serialize = "In Stock")]
    InStock,
    #[strum(serialize = "Low Stock")]
    LowStock,
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
    #[strum(serialize = "Discontinued")]
    Discontinued,
}

impl InventoryStatus {
    /// Status rule used at seed time: a row at or below its reorder point
    /// is Low Stock, anything above is In Stock.
    pub fn for_stock_level(current_stock: i32, reorder_point: i32) -> Self {
        if current_stock <= reorder_point {
            InventoryStatus::LowStock
        } else {
            InventoryStatus::InStock
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 50, InventoryStatus::LowStock)]
    #[case(50, 50, InventoryStatus::LowStock)]
    #[case(51, 50, InventoryStatus::InStock)]
    #[case(1000, 200, InventoryStatus::InStock)]
    fn status_boundary_is_at_reorder_point(
        #[case] stock: i32,
        #[case] reorder_point: i32,
        #[case] expected: InventoryStatus,
    ) {
        assert_eq!(InventoryStatus::for_stock_level(stock, reorder_point), expected);
    }

    #[test]
    fn status_strings_match_schema_check_constraint() {
        assert_eq!(InventoryStatus::InStock.to_string(), "In Stock");
        assert_eq!(InventoryStatus::LowStock.to_string(), "Low Stock");
        assert_eq!(InventoryStatus::OutOfStock.to_string(), "Out of Stock");
        assert_eq!(InventoryStatus::Discontinued.to_string(), "Discontinued");
    }
}
