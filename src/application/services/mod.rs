// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        audit::MutationHookDispatcher,
        commands::catalog::CatalogCommandService,
        ports::{security::PasswordHasher, time::Clock},
        queries::{audit::AuditQueryService, catalog::CatalogQueryService},
        session::SessionFactory,
    },
    domain::{audit::repository::AuditLogRepository, record::RecordStore},
};

pub struct ApplicationServices {
    pub catalog_commands: Arc<CatalogCommandService>,
    pub catalog_queries: Arc<CatalogQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    sessions: Arc<SessionFactory>,
}

impl ApplicationServices {
    pub fn new(
        record_store: Arc<dyn RecordStore>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        dispatcher: Arc<MutationHookDispatcher>,
        password_hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sessions = Arc::new(SessionFactory::new(
            Arc::clone(&record_store),
            dispatcher,
        ));

        let catalog_commands = Arc::new(CatalogCommandService::new(
            Arc::clone(&sessions),
            Arc::clone(&password_hasher),
            Arc::clone(&clock),
        ));
        let catalog_queries = Arc::new(CatalogQueryService::new(record_store));
        let audit_queries = Arc::new(AuditQueryService::new(audit_log_repo));

        Self {
            catalog_commands,
            catalog_queries,
            audit_queries,
            sessions,
        }
    }

    /// Factory for callers that need several mutations in one audited
    /// transaction.
    pub fn sessions(&self) -> Arc<SessionFactory> {
        Arc::clone(&self.sessions)
    }
}
