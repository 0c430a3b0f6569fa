// tests/support/mocks/stores.rs
use async_trait::async_trait;
use nexus_inventory::domain::{
    audit::TransactionContext,
    errors::{DomainError, DomainResult},
    record::{RecordStore, Row, RowFilter, RowQuery, UnitOfWork},
    schema::EntityKind,
    snapshot::FieldSnapshot,
};
use std::sync::Arc;

/// Wraps a store whose audit log cannot be written: any commit that carries
/// staged audit records rolls the inner transaction back and fails.
pub struct RejectingStore {
    inner: Arc<dyn RecordStore>,
}

impl RejectingStore {
    pub fn new(inner: Arc<dyn RecordStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecordStore for RejectingStore {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let inner = self.inner.begin().await?;
        Ok(Box::new(RejectingUnitOfWork { inner }))
    }

    async fn fetch(&self, kind: EntityKind, id: i64) -> DomainResult<Option<Row>> {
        self.inner.fetch(kind, id).await
    }

    async fn list(&self, kind: EntityKind, query: &RowQuery) -> DomainResult<Vec<Row>> {
        self.inner.list(kind, query).await
    }
}

struct RejectingUnitOfWork {
    inner: Box<dyn UnitOfWork>,
}

#[async_trait]
impl UnitOfWork for RejectingUnitOfWork {
    async fn insert_row(&mut self, kind: EntityKind, fields: &FieldSnapshot) -> DomainResult<i64> {
        self.inner.insert_row(kind, fields).await
    }

    async fn fetch_row(&mut self, kind: EntityKind, id: i64) -> DomainResult<Option<Row>> {
        self.inner.fetch_row(kind, id).await
    }

    async fn find_rows(&mut self, kind: EntityKind, filter: &RowFilter) -> DomainResult<Vec<Row>> {
        self.inner.find_rows(kind, filter).await
    }

    async fn update_row(
        &mut self,
        kind: EntityKind,
        id: i64,
        assigned: &FieldSnapshot,
    ) -> DomainResult<()> {
        self.inner.update_row(kind, id, assigned).await
    }

    async fn delete_row(&mut self, kind: EntityKind, id: i64) -> DomainResult<()> {
        self.inner.delete_row(kind, id).await
    }

    fn context(&mut self) -> &mut TransactionContext {
        self.inner.context()
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let mut this = self;
        if this.inner.context().staged().is_empty() {
            return this.inner.commit().await;
        }
        this.inner.rollback().await?;
        Err(DomainError::Persistence("audit log is unavailable".into()))
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        self.inner.rollback().await
    }
}
