// src/domain/mod.rs
pub mod audit;
pub mod component;
pub mod errors;
pub mod facility;
pub mod ids;
pub mod inventory;
pub mod product;
pub mod record;
pub mod schema;
pub mod snapshot;
pub mod user;
mod validation;
