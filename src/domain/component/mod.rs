// src/domain/component/mod.rs
pub mod entity;

pub use crate::domain::ids::ComponentId;
pub use entity::{Component, ComponentUpdate, NewComponent};
