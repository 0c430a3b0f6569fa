// src/domain/audit/entity.rs
use crate::domain::errors::DomainError;
use crate::domain::schema::EntityKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOperation {
    Insert,
    Update,
    Delete,
}

impl AuditOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditOperation::Insert => "insert",
            AuditOperation::Update => "update",
            AuditOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for AuditOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditOperation {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "insert" => Ok(AuditOperation::Insert),
            "update" => Ok(AuditOperation::Update),
            "delete" => Ok(AuditOperation::Delete),
            other => Err(DomainError::Validation(format!(
                "unknown audit operation: {other}"
            ))),
        }
    }
}

/// An audit record staged in a transaction but not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditRecord {
    pub object_id: i64,
    pub entity_type: EntityKind,
    pub operation: AuditOperation,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// A persisted audit record. There is no way to change one after the store
/// has assigned its id.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    id: i64,
    object_id: i64,
    entity_type: EntityKind,
    operation: AuditOperation,
    description: String,
    timestamp: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(id: i64, record: NewAuditRecord) -> Self {
        let NewAuditRecord {
            object_id,
            entity_type,
            operation,
            description,
            timestamp,
        } = record;
        Self {
            id,
            object_id,
            entity_type,
            operation,
            description,
            timestamp,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn object_id(&self) -> i64 {
        self.object_id
    }

    pub fn entity_type(&self) -> EntityKind {
        self.entity_type
    }

    pub fn operation(&self) -> AuditOperation {
        self.operation
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
