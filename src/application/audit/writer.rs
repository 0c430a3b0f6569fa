// src/application/audit/writer.rs
use crate::application::ports::time::Clock;
use crate::domain::audit::{
    AuditOperation, ChangeDescriptor, NewAuditRecord, TransactionContext,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::schema::EntityKind;
use std::sync::Arc;
use tracing::debug;

/// Builds audit records and stages them in the transaction that caused them.
#[derive(Clone)]
pub struct AuditWriter {
    clock: Arc<dyn Clock>,
}

impl AuditWriter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn record_insert(
        &self,
        tx: &mut TransactionContext,
        kind: EntityKind,
        object_id: i64,
        summary: impl Into<String>,
    ) -> DomainResult<()> {
        self.stage(tx, kind, object_id, AuditOperation::Insert, summary.into())
    }

    /// Stage an update record. Returns `false` and stages nothing when
    /// `changes` is empty.
    pub fn record_update(
        &self,
        tx: &mut TransactionContext,
        kind: EntityKind,
        object_id: i64,
        changes: &[ChangeDescriptor],
    ) -> DomainResult<bool> {
        if changes.is_empty() {
            return Ok(false);
        }
        self.stage(
            tx,
            kind,
            object_id,
            AuditOperation::Update,
            describe_changes(changes),
        )?;
        Ok(true)
    }

    pub fn record_delete(
        &self,
        tx: &mut TransactionContext,
        kind: EntityKind,
        object_id: i64,
        summary: impl Into<String>,
    ) -> DomainResult<()> {
        self.stage(tx, kind, object_id, AuditOperation::Delete, summary.into())
    }

    fn stage(
        &self,
        tx: &mut TransactionContext,
        kind: EntityKind,
        object_id: i64,
        operation: AuditOperation,
        description: String,
    ) -> DomainResult<()> {
        if object_id <= 0 {
            return Err(DomainError::Audit(format!(
                "cannot record {operation} of {} without a stored id",
                kind.label()
            )));
        }
        if description.trim().is_empty() {
            return Err(DomainError::Audit(format!(
                "empty description for {operation} of {} {object_id}",
                kind.label()
            )));
        }
        debug!(entity_type = %kind, object_id, %operation, "staging audit record");
        tx.stage(NewAuditRecord {
            object_id,
            entity_type: kind,
            operation,
            description,
            timestamp: self.clock.now(),
        });
        Ok(())
    }
}

pub fn describe_changes(changes: &[ChangeDescriptor]) -> String {
    changes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::FieldValue;
    use chrono::{DateTime, TimeZone, Utc};

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn writer() -> AuditWriter {
        let at = Utc.with_ymd_and_hms(2024, 2, 2, 9, 0, 0).unwrap();
        AuditWriter::new(Arc::new(FixedClock(at)))
    }

    #[test]
    fn update_description_joins_changes_in_order() {
        let mut tx = TransactionContext::new();
        let changes = vec![
            ChangeDescriptor::new("brand", "X".into(), "Y".into()),
            ChangeDescriptor::new("price", FieldValue::Real(10.0), FieldValue::Real(12.0)),
        ];
        let staged = writer()
            .record_update(&mut tx, EntityKind::Product, 3, &changes)
            .unwrap();
        assert!(staged);
        let record = &tx.staged()[0];
        assert_eq!(
            record.description,
            "brand changed from X to Y; price changed from 10.0 to 12.0"
        );
        assert_eq!(record.operation, AuditOperation::Update);
        assert_eq!(record.timestamp.timezone(), Utc);
    }

    #[test]
    fn empty_change_set_stages_nothing() {
        let mut tx = TransactionContext::new();
        let staged = writer()
            .record_update(&mut tx, EntityKind::Product, 3, &[])
            .unwrap();
        assert!(!staged);
        assert!(tx.staged().is_empty());
    }

    #[test]
    fn records_need_an_object_id_and_a_description() {
        let mut tx = TransactionContext::new();
        let writer = writer();
        assert!(matches!(
            writer.record_insert(&mut tx, EntityKind::User, 0, "User created"),
            Err(DomainError::Audit(_))
        ));
        assert!(matches!(
            writer.record_delete(&mut tx, EntityKind::User, 4, " "),
            Err(DomainError::Audit(_))
        ));
        assert!(tx.staged().is_empty());
    }
}
