use super::map_sqlx;
use super::sqlite_audit_log::{insert_audit_record, like_pattern};
use crate::domain::audit::TransactionContext;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::record::{RecordStore, Row, RowFilter, RowQuery, UnitOfWork};
use crate::domain::schema::{ColumnType, EntityKind};
use crate::domain::snapshot::{FieldSnapshot, FieldValue};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    QueryBuilder, Row as _, Sqlite, SqliteConnection, SqlitePool, Transaction, sqlite::SqliteRow,
};
use tracing::debug;

/// Row storage over SQLite, with statements built from the entity schemas.
#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_sqlx)?;
        Ok(Box::new(SqliteUnitOfWork {
            tx,
            context: TransactionContext::new(),
        }))
    }

    async fn fetch(&self, kind: EntityKind, id: i64) -> DomainResult<Option<Row>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        fetch_row(&mut conn, kind, id).await
    }

    async fn list(&self, kind: EntityKind, query: &RowQuery) -> DomainResult<Vec<Row>> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx)?;
        list_rows(&mut conn, kind, query).await
    }
}

pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
    context: TransactionContext,
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    async fn insert_row(&mut self, kind: EntityKind, fields: &FieldSnapshot) -> DomainResult<i64> {
        check_columns(kind, fields)?;
        let mut builder = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {}", kind.table()));
        if fields.is_empty() {
            builder.push(" DEFAULT VALUES");
        } else {
            builder.push(" (");
            builder.push(fields.names().collect::<Vec<_>>().join(", "));
            builder.push(") VALUES (");
            for (index, (_, value)) in fields.iter().enumerate() {
                if index > 0 {
                    builder.push(", ");
                }
                push_value(&mut builder, value);
            }
            builder.push(")");
        }
        builder.push(" RETURNING id");

        builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut *self.tx)
            .await
            .map_err(map_sqlx)
    }

    async fn fetch_row(&mut self, kind: EntityKind, id: i64) -> DomainResult<Option<Row>> {
        fetch_row(&mut self.tx, kind, id).await
    }

    async fn find_rows(&mut self, kind: EntityKind, filter: &RowFilter) -> DomainResult<Vec<Row>> {
        list_rows(&mut self.tx, kind, &RowQuery::from(filter.clone())).await
    }

    async fn update_row(
        &mut self,
        kind: EntityKind,
        id: i64,
        assigned: &FieldSnapshot,
    ) -> DomainResult<()> {
        check_columns(kind, assigned)?;
        if assigned.is_empty() {
            return Ok(());
        }
        let mut builder = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", kind.table()));
        for (index, (name, value)) in assigned.iter().enumerate() {
            if index > 0 {
                builder.push(", ");
            }
            builder.push(name);
            builder.push(" = ");
            push_value(&mut builder, value);
        }
        builder.push(" WHERE id = ");
        builder.push_bind(id);

        let result = builder
            .build()
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(not_found(kind, id));
        }
        Ok(())
    }

    async fn delete_row(&mut self, kind: EntityKind, id: i64) -> DomainResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", kind.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(not_found(kind, id));
        }
        Ok(())
    }

    fn context(&mut self) -> &mut TransactionContext {
        &mut self.context
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let SqliteUnitOfWork { mut tx, mut context } = *self;
        let staged = context.take_staged();
        debug!(records = staged.len(), "flushing audit records");
        // an error here drops `tx`, which rolls the row changes back too
        for record in &staged {
            insert_audit_record(&mut tx, record).await?;
        }
        tx.commit().await.map_err(map_sqlx)
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        self.tx.rollback().await.map_err(map_sqlx)
    }
}

fn not_found(kind: EntityKind, id: i64) -> DomainError {
    DomainError::NotFound(format!("{} {id} not found", kind.label()))
}

fn check_columns(kind: EntityKind, fields: &FieldSnapshot) -> DomainResult<()> {
    match fields.names().find(|name| kind.column(name).is_none()) {
        Some(name) => Err(DomainError::Persistence(format!(
            "{} has no column `{name}`",
            kind.table()
        ))),
        None => Ok(()),
    }
}

fn select_list(kind: EntityKind) -> String {
    std::iter::once("id")
        .chain(kind.columns().iter().map(|column| column.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: &FieldValue) {
    match value.clone() {
        FieldValue::Null => builder.push_bind(Option::<String>::None),
        FieldValue::Bool(v) => builder.push_bind(v),
        FieldValue::Integer(v) => builder.push_bind(v),
        FieldValue::Real(v) => builder.push_bind(v),
        FieldValue::Text(v) => builder.push_bind(v),
        FieldValue::Timestamp(v) => builder.push_bind(v),
    };
}

async fn fetch_row(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: i64,
) -> DomainResult<Option<Row>> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?", select_list(kind), kind.table());
    let row = sqlx::query(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    row.map(|row| decode_row(kind, &row)).transpose()
}

async fn list_rows(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    query: &RowQuery,
) -> DomainResult<Vec<Row>> {
    query.check_columns(kind)?;
    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} FROM {} WHERE 1 = 1",
        select_list(kind),
        kind.table()
    ));
    for filter in &query.filters {
        builder.push(" AND ");
        builder.push(filter.column);
        builder.push(" = ");
        push_value(&mut builder, &filter.value);
    }
    if let Some(search) = &query.search {
        let pattern = like_pattern(&search.needle);
        builder.push(" AND (");
        for (index, column) in search.columns.iter().enumerate() {
            if index > 0 {
                builder.push(" OR ");
            }
            builder.push(format!("CAST({column} AS TEXT) LIKE "));
            builder.push_bind(pattern.clone());
            builder.push(" ESCAPE '\\'");
        }
        builder.push(")");
    }
    builder.push(" ORDER BY ");
    for order in &query.order_by {
        builder.push(order.column);
        builder.push(if order.descending { " DESC, " } else { " ASC, " });
    }
    builder.push("id");

    let rows = builder
        .build()
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx)?;
    rows.iter().map(|row| decode_row(kind, row)).collect()
}

fn decode_row(kind: EntityKind, row: &SqliteRow) -> DomainResult<Row> {
    let id: i64 = row.try_get("id").map_err(map_sqlx)?;
    let mut fields = FieldSnapshot::new();
    for column in kind.columns() {
        let name = column.name;
        let value = match column.ty {
            ColumnType::Text => row.try_get::<Option<String>, _>(name).map(FieldValue::from),
            ColumnType::Integer => row.try_get::<Option<i64>, _>(name).map(FieldValue::from),
            ColumnType::Real => row.try_get::<Option<f64>, _>(name).map(FieldValue::from),
            ColumnType::Boolean => row.try_get::<Option<bool>, _>(name).map(FieldValue::from),
            ColumnType::Timestamp => row
                .try_get::<Option<DateTime<Utc>>, _>(name)
                .map(FieldValue::from),
        }
        .map_err(map_sqlx)?;
        fields.set(name, value);
    }
    Ok(Row { id, fields })
}
