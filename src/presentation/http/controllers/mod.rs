// src/presentation/http/controllers/mod.rs
pub mod audit;
pub mod components;
pub mod facilities;
pub mod inventory;
pub mod products;
pub mod users;

use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement returned by delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub status: String,
}

impl DeletedResponse {
    pub(crate) fn new() -> Self {
        Self {
            status: "deleted".into(),
        }
    }
}
