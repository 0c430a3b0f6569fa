// src/domain/inventory/mod.rs
pub mod entity;

pub use crate::domain::ids::{ComponentInventoryId, ProductInventoryId};
pub use entity::{
    ComponentInventory, NewComponentInventory, NewProductInventory, ProductInventory, StockUpdate,
};
