// src/domain/audit/cursor.rs
use crate::domain::errors::{DomainError, DomainResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};

/// Keyset position in the audit log: the `(timestamp, id)` of the last record
/// handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogCursor {
    pub timestamp: DateTime<Utc>,
    pub id: i64,
}

impl AuditLogCursor {
    pub fn new(timestamp: DateTime<Utc>, id: i64) -> Self {
        Self { timestamp, id }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}|{}", self.timestamp.to_rfc3339(), self.id);
        URL_SAFE_NO_PAD.encode(raw.as_bytes())
    }

    pub fn decode(token: &str) -> DomainResult<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(token).map_err(|_| invalid())?;
        let raw = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (timestamp, id) = raw.split_once('|').ok_or_else(invalid)?;
        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .map_err(|_| invalid())?
            .with_timezone(&Utc);
        let id = id.parse::<i64>().map_err(|_| invalid())?;
        Ok(Self::new(timestamp, id))
    }
}

fn invalid() -> DomainError {
    DomainError::Validation("invalid cursor token".into())
}
