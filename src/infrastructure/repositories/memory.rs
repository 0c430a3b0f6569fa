use crate::domain::audit::{
    AuditLogCursor, AuditLogFilter, AuditLogRepository, AuditRecord, SortOrder,
    TransactionContext,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{RecordStore, Row, RowFilter, RowQuery, UnitOfWork};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::{FieldSnapshot, FieldValue};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Process-local record store and audit log.
///
/// Mirrors the SQLite store: references are checked, deleting an owner
/// cascades to the rows it owns, and a unit of work becomes visible only when
/// it commits, together with its audit records.
///
/// Writers are serialized. `begin` waits until the previous unit of work has
/// committed or rolled back, so every unit of work reads the latest committed
/// rows and stamps its audit records after the previous commit.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
    writer: Arc<Mutex<()>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every committed audit record in insertion order.
    pub async fn audit_records(&self) -> Vec<AuditRecord> {
        self.state.lock().await.audit.clone()
    }
}

#[derive(Default)]
struct MemoryState {
    tables: Tables,
    next_ids: BTreeMap<EntityKind, i64>,
    audit: Vec<AuditRecord>,
    next_audit_id: i64,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    rows: BTreeMap<EntityKind, BTreeMap<i64, FieldSnapshot>>,
}

impl Tables {
    fn get(&self, kind: EntityKind, id: i64) -> Option<Row> {
        self.rows
            .get(&kind)
            .and_then(|table| table.get(&id))
            .map(|fields| Row {
                id,
                fields: fields.clone(),
            })
    }

    fn select(&self, kind: EntityKind, query: &RowQuery) -> DomainResult<Vec<Row>> {
        query.check_columns(kind)?;
        let Some(table) = self.rows.get(&kind) else {
            return Ok(Vec::new());
        };
        let mut rows: Vec<Row> = table
            .iter()
            .map(|(id, fields)| Row {
                id: *id,
                fields: fields.clone(),
            })
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|filter| column_value(row, filter.column) == filter.value)
            })
            .filter(|row| {
                query.search.as_ref().is_none_or(|search| {
                    let needle = search.needle.to_ascii_lowercase();
                    search.columns.iter().any(|column| {
                        let value = column_value(row, column);
                        !value.is_null()
                            && value.to_string().to_ascii_lowercase().contains(&needle)
                    })
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            query
                .order_by
                .iter()
                .map(|order| {
                    let ordering = compare_values(
                        &column_value(a, order.column),
                        &column_value(b, order.column),
                    );
                    if order.descending {
                        ordering.reverse()
                    } else {
                        ordering
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
                .then(a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    fn insert(&mut self, kind: EntityKind, id: i64, fields: &FieldSnapshot) -> DomainResult<()> {
        let mut stored = FieldSnapshot::new();
        for column in kind.columns() {
            stored.set(
                column.name,
                fields.get(column.name).cloned().unwrap_or(FieldValue::Null),
            );
        }
        self.check_row(kind, id, &stored)?;
        self.rows.entry(kind).or_default().insert(id, stored);
        Ok(())
    }

    fn update(&mut self, kind: EntityKind, id: i64, assigned: &FieldSnapshot) -> DomainResult<()> {
        let current = self.get(kind, id).ok_or_else(|| not_found(kind, id))?;
        let merged = current.fields.overlay(assigned);
        self.check_row(kind, id, &merged)?;
        self.rows.entry(kind).or_default().insert(id, merged);
        Ok(())
    }

    fn delete(&mut self, kind: EntityKind, id: i64) -> DomainResult<()> {
        self.rows
            .get_mut(&kind)
            .and_then(|table| table.remove(&id))
            .ok_or_else(|| not_found(kind, id))?;
        for (dependent, column) in kind.dependents() {
            if let Some(table) = self.rows.get_mut(&dependent) {
                table.retain(|_, fields| fields.get(column.name) != Some(&FieldValue::Integer(id)));
            }
        }
        Ok(())
    }

    fn check_row(&self, kind: EntityKind, id: i64, fields: &FieldSnapshot) -> DomainResult<()> {
        for (name, _) in fields.iter() {
            if kind.column(name).is_none() {
                return Err(DomainError::Persistence(format!(
                    "{} has no column `{name}`",
                    kind.table()
                )));
            }
        }
        kind.validate_row(fields)?;
        for column in kind.columns() {
            let value = fields.value(column.name);
            if let (Some(target), FieldValue::Integer(target_id)) = (column.references, value) {
                if self.get(target, *target_id).is_none() {
                    return Err(DomainError::NotFound("referenced record not found".into()));
                }
            }
            if column.unique && !value.is_null() {
                let taken = self.rows.get(&kind).is_some_and(|table| {
                    table
                        .iter()
                        .any(|(other, row)| *other != id && row.get(column.name) == Some(value))
                });
                if taken {
                    return Err(DomainError::Conflict(format!(
                        "unique constraint violated: {}.{}",
                        kind.table(),
                        column.name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn column_value(row: &Row, column: &str) -> FieldValue {
    if column == "id" {
        FieldValue::Integer(row.id)
    } else {
        row.fields.value(column).clone()
    }
}

/// Orders values the way SQLite does for one column: nulls first, numbers
/// by value, text bytewise.
fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    use FieldValue::*;
    match (a, b) {
        (Null, Null) => Ordering::Equal,
        (Null, _) => Ordering::Less,
        (_, Null) => Ordering::Greater,
        (Bool(a), Bool(b)) => a.cmp(b),
        (Integer(a), Integer(b)) => a.cmp(b),
        (Real(a), Real(b)) => a.total_cmp(b),
        #[allow(clippy::cast_precision_loss)]
        (Integer(a), Real(b)) => (*a as f64).total_cmp(b),
        #[allow(clippy::cast_precision_loss)]
        (Real(a), Integer(b)) => a.total_cmp(&(*b as f64)),
        (Text(a), Text(b)) => a.as_bytes().cmp(b.as_bytes()),
        (Timestamp(a), Timestamp(b)) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

fn not_found(kind: EntityKind, id: i64) -> DomainError {
    DomainError::NotFound(format!("{} {id} not found", kind.label()))
}

/// Works on a private copy of the tables while holding the writer lock and
/// publishes the copy at commit.
pub struct InMemoryUnitOfWork {
    state: Arc<Mutex<MemoryState>>,
    working: Tables,
    context: TransactionContext,
    _writer: OwnedMutexGuard<()>,
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let writer = Arc::clone(&self.writer).lock_owned().await;
        let working = self.state.lock().await.tables.clone();
        Ok(Box::new(InMemoryUnitOfWork {
            state: Arc::clone(&self.state),
            working,
            context: TransactionContext::new(),
            _writer: writer,
        }))
    }

    async fn fetch(&self, kind: EntityKind, id: i64) -> DomainResult<Option<Row>> {
        Ok(self.state.lock().await.tables.get(kind, id))
    }

    async fn list(&self, kind: EntityKind, query: &RowQuery) -> DomainResult<Vec<Row>> {
        self.state.lock().await.tables.select(kind, query)
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn insert_row(&mut self, kind: EntityKind, fields: &FieldSnapshot) -> DomainResult<i64> {
        let id = {
            let mut state = self.state.lock().await;
            let next = state.next_ids.entry(kind).or_insert(0);
            *next += 1;
            *next
        };
        self.working.insert(kind, id, fields)?;
        Ok(id)
    }

    async fn fetch_row(&mut self, kind: EntityKind, id: i64) -> DomainResult<Option<Row>> {
        Ok(self.working.get(kind, id))
    }

    async fn find_rows(&mut self, kind: EntityKind, filter: &RowFilter) -> DomainResult<Vec<Row>> {
        self.working.select(kind, &RowQuery::from(filter.clone()))
    }

    async fn update_row(
        &mut self,
        kind: EntityKind,
        id: i64,
        assigned: &FieldSnapshot,
    ) -> DomainResult<()> {
        self.working.update(kind, id, assigned)
    }

    async fn delete_row(&mut self, kind: EntityKind, id: i64) -> DomainResult<()> {
        self.working.delete(kind, id)
    }

    fn context(&mut self) -> &mut TransactionContext {
        &mut self.context
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let InMemoryUnitOfWork {
            state,
            working,
            mut context,
            _writer,
        } = *self;
        let staged = context.take_staged();
        debug!(records = staged.len(), "flushing audit records");

        let mut state = state.lock().await;
        state.tables = working;
        for record in staged {
            state.next_audit_id += 1;
            let id = state.next_audit_id;
            state.audit.push(AuditRecord::new(id, record));
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryStore {
    async fn list(
        &self,
        filter: &AuditLogFilter,
        order: SortOrder,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditRecord>, Option<String>)> {
        let state = self.state.lock().await;
        let mut records: Vec<&AuditRecord> = state
            .audit
            .iter()
            .filter(|record| filter.matches(record))
            .collect();
        records.sort_by_key(|record| (record.timestamp(), record.id()));
        if order == SortOrder::Desc {
            records.reverse();
        }
        if let Some(cursor) = cursor {
            let position = (cursor.timestamp, cursor.id);
            records.retain(|record| {
                let key = (record.timestamp(), record.id());
                match order {
                    SortOrder::Desc => key < position,
                    SortOrder::Asc => key > position,
                }
            });
        }

        let limit = limit as usize;
        let has_more = records.len() > limit;
        let page: Vec<AuditRecord> = records.into_iter().take(limit).cloned().collect();
        let next_cursor = has_more
            .then(|| page.last())
            .flatten()
            .map(|last| AuditLogCursor::new(last.timestamp(), last.id()).encode());
        Ok((page, next_cursor))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AuditRecord>> {
        Ok(self
            .state
            .lock()
            .await
            .audit
            .iter()
            .find(|record| record.id() == id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facility() -> FieldSnapshot {
        FieldSnapshot::new()
            .with("name", "Plant")
            .with("longitude", 11.5)
            .with("latitude", 48.1)
            .with("is_operating", true)
    }

    #[tokio::test]
    async fn uncommitted_work_is_invisible() {
        let store = InMemoryStore::new();
        let mut uow = store.begin().await.unwrap();
        let id = uow.insert_row(EntityKind::Facility, &facility()).await.unwrap();
        assert!(uow.fetch_row(EntityKind::Facility, id).await.unwrap().is_some());
        assert!(store.fetch(EntityKind::Facility, id).await.unwrap().is_none());
        uow.rollback().await.unwrap();
        assert!(store.fetch(EntityKind::Facility, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dangling_references_are_rejected() {
        let store = InMemoryStore::new();
        let mut uow = store.begin().await.unwrap();
        let stock = FieldSnapshot::new()
            .with("component_id", 99_i64)
            .with("count", 1_i64)
            .with("production_facility_id", 1_i64)
            .with("last_updated", chrono::Utc::now());
        let err = uow
            .insert_row(EntityKind::ComponentInventory, &stock)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn second_writer_waits_for_the_first_to_finish() {
        let store = InMemoryStore::new();
        let mut first = store.begin().await.unwrap();
        let id = first.insert_row(EntityKind::Facility, &facility()).await.unwrap();

        let waiting = tokio::spawn({
            let store = store.clone();
            async move {
                let mut second = store.begin().await?;
                let row = second.fetch_row(EntityKind::Facility, id).await?;
                second.rollback().await?;
                Ok::<_, DomainError>(row)
            }
        });
        tokio::task::yield_now().await;
        assert!(!waiting.is_finished());

        first.commit().await.unwrap();
        let seen = waiting.await.unwrap().unwrap();
        assert!(seen.is_some(), "second writer starts from the committed rows");
    }
}
