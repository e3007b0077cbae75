use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// An open purchase order for one inventory item.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(schema_name = "dm_operations", table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub order_id: i32,
    pub inventory_id: Option<i32>,
    pub order_date: NaiveDate,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_amount: Decimal,
    pub customer_name: Option<String>,
    pub status: Option<String>,
    pub expected_delivery_date: Option<NaiveDate>,
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

/// Order lifecycle status stored in `orders.status`. The seeder only ever
/// writes `Pending`; the schema accepts the full set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumString)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}
