// src/domain/audit/mod.rs
pub mod change;
pub mod context;
pub mod cursor;
mod cursor_tests;
pub mod diff;
pub mod entity;
pub mod filter;
pub mod repository;

pub use change::ChangeDescriptor;
pub use context::TransactionContext;
pub use cursor::AuditLogCursor;
pub use diff::{diff, diff_pending};
pub use entity::{AuditOperation, AuditRecord, NewAuditRecord};
pub use filter::{AuditLogFilter, SortOrder};
pub use repository::AuditLogRepository;
