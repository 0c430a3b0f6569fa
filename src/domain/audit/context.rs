// src/domain/audit/context.rs
use crate::domain::audit::entity::NewAuditRecord;

/// Audit records staged by the hooks of one transaction, flushed by the
/// owning unit of work at commit.
#[derive(Debug, Default)]
pub struct TransactionContext {
    staged: Vec<NewAuditRecord>,
}

impl TransactionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&mut self, record: NewAuditRecord) {
        self.staged.push(record);
    }

    pub fn staged(&self) -> &[NewAuditRecord] {
        &self.staged
    }

    pub fn take_staged(&mut self) -> Vec<NewAuditRecord> {
        std::mem::take(&mut self.staged)
    }
}
