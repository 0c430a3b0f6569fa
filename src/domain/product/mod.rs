// src/domain/product/mod.rs
pub mod entity;

pub use crate::domain::ids::ProductId;
pub use entity::{NewProduct, Product, ProductUpdate};
