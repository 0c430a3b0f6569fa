// src/application/commands/catalog/mod.rs
mod components;
mod facilities;
mod inventory;
mod password;
mod products;
mod service;
mod users;

pub use components::{CreateComponentCommand, UpdateComponentCommand};
pub use facilities::{CreateFacilityCommand, UpdateFacilityCommand};
pub use inventory::{
    CreateComponentStockCommand, CreateProductStockCommand, SaveChangesCommand, StockChange,
};
pub use products::{CreateProductCommand, UpdateProductCommand};
pub use service::CatalogCommandService;
pub use users::{CreateUserCommand, UpdateUserCommand};
