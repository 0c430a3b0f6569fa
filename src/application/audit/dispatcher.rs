// src/application/audit/dispatcher.rs
use crate::application::audit::writer::AuditWriter;
use crate::application::ports::time::Clock;
use crate::domain::audit::{ChangeDescriptor, TransactionContext};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::FieldSnapshot;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// What a hook sees: the entity being mutated and the transaction to stage
/// its audit record in.
pub struct HookContext<'a> {
    pub kind: EntityKind,
    pub object_id: i64,
    writer: &'a AuditWriter,
    tx: &'a mut TransactionContext,
}

impl HookContext<'_> {
    pub fn record_insert(&mut self, summary: impl Into<String>) -> DomainResult<()> {
        self.writer
            .record_insert(self.tx, self.kind, self.object_id, summary)
    }

    pub fn record_update(&mut self, changes: &[ChangeDescriptor]) -> DomainResult<bool> {
        self.writer
            .record_update(self.tx, self.kind, self.object_id, changes)
    }

    pub fn record_delete(&mut self, summary: impl Into<String>) -> DomainResult<()> {
        self.writer
            .record_delete(self.tx, self.kind, self.object_id, summary)
    }
}

/// Runs after the row is inserted; receives the inserted fields.
pub type PostInsertHook = fn(&mut HookContext<'_>, &FieldSnapshot) -> DomainResult<()>;
/// Runs after the row is updated; receives prior, current and pending fields.
pub type PostUpdateHook =
    fn(&mut HookContext<'_>, &FieldSnapshot, &FieldSnapshot, &FieldSnapshot) -> DomainResult<()>;
/// Runs before the row is deleted; receives the row as it is about to vanish.
pub type PreDeleteHook = fn(&mut HookContext<'_>, &FieldSnapshot) -> DomainResult<()>;

#[derive(Clone, Copy)]
pub struct HookSet {
    pub post_insert: PostInsertHook,
    pub post_update: PostUpdateHook,
    pub pre_delete: PreDeleteHook,
}

/// Routes mutations of tracked entity kinds to their hooks.
pub struct MutationHookDispatcher {
    writer: AuditWriter,
    hooks: BTreeMap<EntityKind, HookSet>,
}

impl MutationHookDispatcher {
    pub fn builder(clock: Arc<dyn Clock>) -> DispatcherBuilder {
        DispatcherBuilder {
            writer: AuditWriter::new(clock),
            hooks: BTreeMap::new(),
        }
    }

    pub fn is_tracked(&self, kind: EntityKind) -> bool {
        self.hooks.contains_key(&kind)
    }

    pub fn tracked_kinds(&self) -> Vec<EntityKind> {
        self.hooks.keys().copied().collect()
    }

    pub fn post_insert(
        &self,
        tx: &mut TransactionContext,
        kind: EntityKind,
        object_id: i64,
        fields: &FieldSnapshot,
    ) -> DomainResult<()> {
        let hooks = self.hooks_for(kind)?;
        (hooks.post_insert)(&mut self.context(tx, kind, object_id), fields)
    }

    pub fn post_update(
        &self,
        tx: &mut TransactionContext,
        kind: EntityKind,
        object_id: i64,
        prior: &FieldSnapshot,
        current: &FieldSnapshot,
        pending: &FieldSnapshot,
    ) -> DomainResult<()> {
        let hooks = self.hooks_for(kind)?;
        (hooks.post_update)(
            &mut self.context(tx, kind, object_id),
            prior,
            current,
            pending,
        )
    }

    pub fn pre_delete(
        &self,
        tx: &mut TransactionContext,
        kind: EntityKind,
        object_id: i64,
        fields: &FieldSnapshot,
    ) -> DomainResult<()> {
        let hooks = self.hooks_for(kind)?;
        (hooks.pre_delete)(&mut self.context(tx, kind, object_id), fields)
    }

    fn hooks_for(&self, kind: EntityKind) -> DomainResult<&HookSet> {
        self.hooks
            .get(&kind)
            .ok_or_else(|| DomainError::UnknownEntity(kind.as_str().to_string()))
    }

    fn context<'a>(
        &'a self,
        tx: &'a mut TransactionContext,
        kind: EntityKind,
        object_id: i64,
    ) -> HookContext<'a> {
        HookContext {
            kind,
            object_id,
            writer: &self.writer,
            tx,
        }
    }
}

pub struct DispatcherBuilder {
    writer: AuditWriter,
    hooks: BTreeMap<EntityKind, HookSet>,
}

impl DispatcherBuilder {
    /// Bind hooks to `kind`. A kind that is already bound keeps its first
    /// binding.
    pub fn register(mut self, kind: EntityKind, hooks: HookSet) -> Self {
        if self.hooks.contains_key(&kind) {
            debug!(entity_type = %kind, "hooks already registered; keeping existing binding");
        } else {
            debug!(entity_type = %kind, "registering audit hooks");
            self.hooks.insert(kind, hooks);
        }
        self
    }

    pub fn build(self) -> MutationHookDispatcher {
        MutationHookDispatcher {
            writer: self.writer,
            hooks: self.hooks,
        }
    }
}
