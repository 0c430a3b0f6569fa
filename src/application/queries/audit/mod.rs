mod common;
mod list;
mod service;

pub use list::{ListAuditRecordsQuery, ObjectHistoryQuery};
pub use service::AuditQueryService;
