// src/domain/facility/mod.rs
pub mod entity;

pub use crate::domain::ids::FacilityId;
pub use entity::{Facility, FacilityUpdate, NewFacility};
