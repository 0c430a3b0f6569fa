// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod sqlite_audit_log;
mod sqlite_records;

pub use error::map_sqlx;
pub use memory::{InMemoryStore, InMemoryUnitOfWork};
pub use sqlite_audit_log::SqliteAuditLogRepository;
pub use sqlite_records::{SqliteRecordStore, SqliteUnitOfWork};
