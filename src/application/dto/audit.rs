// src/application/dto/audit.rs
use super::serde_time;
use crate::domain::audit::AuditRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditRecordDto {
    pub id: i64,
    pub object_id: i64,
    /// One of `product`, `component`, `facility`, `user`, `product_inventory`,
    /// `component_inventory`.
    pub entity_type: String,
    /// `insert`, `update` or `delete`.
    pub operation: String,
    pub description: String,
    #[serde(with = "serde_time")]
    pub timestamp: DateTime<Utc>,
}

impl From<AuditRecord> for AuditRecordDto {
    fn from(record: AuditRecord) -> Self {
        Self {
            id: record.id(),
            object_id: record.object_id(),
            entity_type: record.entity_type().as_str().to_string(),
            operation: record.operation().as_str().to_string(),
            description: record.description().to_string(),
            timestamp: record.timestamp(),
        }
    }
}
