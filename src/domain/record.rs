// src/domain/record.rs
use crate::domain::audit::context::TransactionContext;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::schema::EntityKind;
use crate::domain::snapshot::{FieldSnapshot, FieldValue};
use async_trait::async_trait;

/// A stored row: its surrogate id plus the schema columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: i64,
    pub fields: FieldSnapshot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowFilter {
    pub column: &'static str,
    pub value: FieldValue,
}

impl RowFilter {
    pub fn eq(column: &'static str, value: impl Into<FieldValue>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

/// Case-insensitive substring match over a set of columns. `id` may be
/// listed alongside the schema columns. Case folding is ASCII only.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSearch {
    pub columns: &'static [&'static str],
    pub needle: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowOrder {
    pub column: &'static str,
    pub descending: bool,
}

/// Which rows `RecordStore::list` returns, and in what order.
///
/// Filters are ANDed. Rows are sorted by `order_by` and then by id, with
/// nulls first in ascending order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowQuery {
    pub filters: Vec<RowFilter>,
    pub search: Option<RowSearch>,
    pub order_by: Vec<RowOrder>,
}

impl RowQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: RowFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add an equality filter when `value` is present.
    pub fn filter_opt<V: Into<FieldValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.filter(RowFilter::eq(column, value)),
            None => self,
        }
    }

    /// Search `columns` for `needle`; blank needles are ignored.
    pub fn search(mut self, columns: &'static [&'static str], needle: Option<String>) -> Self {
        self.search = needle
            .filter(|needle| !needle.trim().is_empty())
            .map(|needle| RowSearch {
                columns,
                needle: needle.trim().to_string(),
            });
        self
    }

    pub fn order_by(mut self, column: &'static str, descending: bool) -> Self {
        self.order_by.push(RowOrder { column, descending });
        self
    }

    /// Fail when the query names a column `kind` does not have.
    pub fn check_columns(&self, kind: EntityKind) -> DomainResult<()> {
        let mut columns = self
            .filters
            .iter()
            .map(|filter| filter.column)
            .chain(self.search.iter().flat_map(|search| search.columns.iter().copied()))
            .chain(self.order_by.iter().map(|order| order.column));
        match columns.find(|name| *name != "id" && kind.column(name).is_none()) {
            Some(name) => Err(DomainError::Persistence(format!(
                "{} has no column `{name}`",
                kind.table()
            ))),
            None => Ok(()),
        }
    }
}

impl From<RowFilter> for RowQuery {
    fn from(filter: RowFilter) -> Self {
        Self::all().filter(filter)
    }
}

/// Typed view over the rows of one [`EntityKind`].
pub trait EntityRecord: Sized + Send + Sync + 'static {
    const KIND: EntityKind;
    type New: Send + Sync;
    type Update: Send + Sync;

    fn from_row(row: Row) -> DomainResult<Self>;

    /// Every column of a row about to be inserted.
    fn new_fields(new: &Self::New) -> FieldSnapshot;

    /// Only the columns explicitly assigned by `update`.
    fn assignments(update: &Self::Update) -> FieldSnapshot;
}

/// One open storage transaction.
///
/// Audit records staged in [`UnitOfWork::context`] are written by `commit`
/// inside the same transaction; dropping the unit of work without committing
/// discards both the row changes and the staged records.
#[async_trait]
pub trait UnitOfWork: Send {
    async fn insert_row(&mut self, kind: EntityKind, fields: &FieldSnapshot) -> DomainResult<i64>;
    async fn fetch_row(&mut self, kind: EntityKind, id: i64) -> DomainResult<Option<Row>>;
    async fn find_rows(&mut self, kind: EntityKind, filter: &RowFilter) -> DomainResult<Vec<Row>>;
    async fn update_row(
        &mut self,
        kind: EntityKind,
        id: i64,
        assigned: &FieldSnapshot,
    ) -> DomainResult<()>;
    async fn delete_row(&mut self, kind: EntityKind, id: i64) -> DomainResult<()>;

    fn context(&mut self) -> &mut TransactionContext;

    async fn commit(self: Box<Self>) -> DomainResult<()>;
    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>>;
    async fn fetch(&self, kind: EntityKind, id: i64) -> DomainResult<Option<Row>>;
    async fn list(&self, kind: EntityKind, query: &RowQuery) -> DomainResult<Vec<Row>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_dropped() {
        let query = RowQuery::all().search(&["name"], Some("   ".into()));
        assert!(query.search.is_none());
        let query = RowQuery::all().search(&["name"], Some(" plant ".into()));
        assert_eq!(query.search.map(|s| s.needle), Some("plant".to_string()));
    }

    #[test]
    fn unknown_columns_are_rejected() {
        let query = RowQuery::all()
            .filter_opt("category", Some("Laptops"))
            .filter_opt::<bool>("available", None)
            .search(&["id", "brand"], Some("acme".into()));
        assert_eq!(query.filters.len(), 1);
        assert!(query.check_columns(EntityKind::Product).is_ok());

        let bad = RowQuery::all().order_by("colour", false);
        assert!(matches!(
            bad.check_columns(EntityKind::Product),
            Err(DomainError::Persistence(_))
        ));
    }
}
