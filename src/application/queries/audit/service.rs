use std::sync::Arc;

use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::audit::{AuditLogCursor, repository::AuditLogRepository},
};

/// Read side of the audit log. Records are never mutated through it.
pub struct AuditQueryService {
    pub(super) repo: Arc<dyn AuditLogRepository>,
}

impl AuditQueryService {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { repo }
    }

    pub(super) fn decode_cursor(token: &str) -> ApplicationResult<AuditLogCursor> {
        AuditLogCursor::decode(token).map_err(ApplicationError::from)
    }
}
