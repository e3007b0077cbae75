use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A completed sale of one inventory item. Location is recorded on the
/// sale itself and may differ from the referenced item's location.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "dm_operations", table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub sale_id: i32,
    pub inventory_id: Option<i32>,
    pub sale_date: NaiveDate,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub customer_name: Option<String>,
    pub location_name: String,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory::Entity",
        from = "Column::InventoryId",
        to = "super::inventory::Column::InventoryId"
    )]
    Inventory,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
