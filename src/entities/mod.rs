pub mod inventory;
pub mod order;
pub mod sale;

pub use inventory::InventoryStatus;
pub use order::OrderStatus;
