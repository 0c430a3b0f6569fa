// src/application/session.rs
use crate::application::audit::MutationHookDispatcher;
use crate::domain::audit::NewAuditRecord;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{EntityRecord, RecordStore, Row, RowFilter, UnitOfWork};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::FieldSnapshot;
use std::sync::Arc;

/// Opens audited sessions against one record store.
#[derive(Clone)]
pub struct SessionFactory {
    store: Arc<dyn RecordStore>,
    dispatcher: Arc<MutationHookDispatcher>,
}

impl SessionFactory {
    pub fn new(store: Arc<dyn RecordStore>, dispatcher: Arc<MutationHookDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    pub async fn begin(&self) -> DomainResult<AuditedSession> {
        let uow = self.store.begin().await?;
        Ok(AuditedSession {
            uow,
            dispatcher: Arc::clone(&self.dispatcher),
        })
    }

    pub fn store(&self) -> Arc<dyn RecordStore> {
        Arc::clone(&self.store)
    }

    pub fn dispatcher(&self) -> &MutationHookDispatcher {
        &self.dispatcher
    }
}

/// One transaction whose mutations of tracked kinds are audited.
///
/// Audit records are staged as mutations happen and written by [`commit`]
/// together with the rows. Dropping the session without committing rolls
/// everything back.
///
/// [`commit`]: AuditedSession::commit
pub struct AuditedSession {
    uow: Box<dyn UnitOfWork>,
    dispatcher: Arc<MutationHookDispatcher>,
}

impl AuditedSession {
    pub async fn insert<T: EntityRecord>(&mut self, new: &T::New) -> DomainResult<T> {
        let row = self.insert_fields(T::KIND, T::new_fields(new)).await?;
        T::from_row(row)
    }

    pub async fn insert_fields(
        &mut self,
        kind: EntityKind,
        fields: FieldSnapshot,
    ) -> DomainResult<Row> {
        kind.validate_row(&fields)?;
        let id = self.uow.insert_row(kind, &fields).await?;
        if self.dispatcher.is_tracked(kind) {
            self.dispatcher
                .post_insert(self.uow.context(), kind, id, &fields)?;
        }
        Ok(Row { id, fields })
    }

    pub async fn find<T: EntityRecord>(&mut self, id: i64) -> DomainResult<Option<T>> {
        self.uow
            .fetch_row(T::KIND, id)
            .await?
            .map(T::from_row)
            .transpose()
    }

    pub async fn find_row(&mut self, kind: EntityKind, id: i64) -> DomainResult<Option<Row>> {
        self.uow.fetch_row(kind, id).await
    }

    pub async fn update<T: EntityRecord>(
        &mut self,
        id: i64,
        update: &T::Update,
    ) -> DomainResult<T> {
        let row = self
            .update_fields(T::KIND, id, &T::assignments(update))
            .await?;
        T::from_row(row)
    }

    /// Apply `pending` to row `id` and audit the fields it actually changed.
    pub async fn update_fields(
        &mut self,
        kind: EntityKind,
        id: i64,
        pending: &FieldSnapshot,
    ) -> DomainResult<Row> {
        let prior = self.fetch_existing(kind, id).await?;
        if pending.is_empty() {
            return Ok(prior);
        }
        kind.validate_assignments(pending)?;
        self.uow.update_row(kind, id, pending).await?;
        let current = prior.fields.overlay(pending);
        if self.dispatcher.is_tracked(kind) {
            self.dispatcher.post_update(
                self.uow.context(),
                kind,
                id,
                &prior.fields,
                &current,
                pending,
            )?;
        }
        Ok(Row {
            id,
            fields: current,
        })
    }

    pub async fn delete<T: EntityRecord>(&mut self, id: i64) -> DomainResult<()> {
        self.delete_by_kind(T::KIND, id).await
    }

    /// Delete row `id` after deleting the rows that reference it. Referencing
    /// kinds have no dependents of their own.
    pub async fn delete_by_kind(&mut self, kind: EntityKind, id: i64) -> DomainResult<()> {
        let row = self.fetch_existing(kind, id).await?;
        for (dependent, column) in kind.dependents() {
            let children = self
                .uow
                .find_rows(dependent, &RowFilter::eq(column.name, id))
                .await?;
            for child in children {
                self.delete_row(dependent, child).await?;
            }
        }
        self.delete_row(kind, row).await
    }

    pub fn staged_records(&mut self) -> &[NewAuditRecord] {
        self.uow.context().staged()
    }

    pub async fn commit(self) -> DomainResult<()> {
        self.uow.commit().await
    }

    pub async fn rollback(self) -> DomainResult<()> {
        self.uow.rollback().await
    }

    async fn delete_row(&mut self, kind: EntityKind, row: Row) -> DomainResult<()> {
        if self.dispatcher.is_tracked(kind) {
            self.dispatcher
                .pre_delete(self.uow.context(), kind, row.id, &row.fields)?;
        }
        self.uow.delete_row(kind, row.id).await
    }

    async fn fetch_existing(&mut self, kind: EntityKind, id: i64) -> DomainResult<Row> {
        self.uow
            .fetch_row(kind, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("{} {id} not found", kind.label())))
    }
}
