// src/domain/audit/repository.rs
use crate::domain::audit::cursor::AuditLogCursor;
use crate::domain::audit::entity::AuditRecord;
use crate::domain::audit::filter::{AuditLogFilter, SortOrder};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// Read side of the audit log. Records are only ever written by a unit of
/// work at commit.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// Up to `limit` records after `cursor` in `(timestamp, id)` order, plus
    /// the cursor of the next page if more remain.
    async fn list(
        &self,
        filter: &AuditLogFilter,
        order: SortOrder,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditRecord>, Option<String>)>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AuditRecord>>;
}
