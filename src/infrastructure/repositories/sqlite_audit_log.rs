use super::map_sqlx;
use crate::domain::audit::{
    AuditLogCursor, AuditLogFilter, AuditLogRepository, AuditOperation, AuditRecord,
    NewAuditRecord, SortOrder,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::schema::EntityKind;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const SELECT_AUDIT: &str =
    "SELECT id, object_id, entity_type, operation, description, timestamp FROM audit_records";

/// Append one staged record inside the caller's transaction.
pub(crate) async fn insert_audit_record(
    conn: &mut SqliteConnection,
    record: &NewAuditRecord,
) -> DomainResult<i64> {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO audit_records (object_id, entity_type, operation, description, timestamp) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(record.object_id)
    .bind(record.entity_type.as_str())
    .bind(record.operation.as_str())
    .bind(record.description.as_str())
    .bind(record.timestamp)
    .fetch_one(conn)
    .await
    .map_err(map_sqlx)
}

#[derive(Clone)]
pub struct SqliteAuditLogRepository {
    pool: SqlitePool,
}

impl SqliteAuditLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditRow {
    id: i64,
    object_id: i64,
    entity_type: String,
    operation: String,
    description: String,
    timestamp: DateTime<Utc>,
}

impl TryFrom<AuditRow> for AuditRecord {
    type Error = DomainError;

    fn try_from(row: AuditRow) -> Result<Self, Self::Error> {
        let entity_type = row.entity_type.parse::<EntityKind>().map_err(|_| {
            DomainError::Persistence(format!("unexpected entity type `{}`", row.entity_type))
        })?;
        let operation = row.operation.parse::<AuditOperation>().map_err(|_| {
            DomainError::Persistence(format!("unexpected operation `{}`", row.operation))
        })?;
        Ok(AuditRecord::new(
            row.id,
            NewAuditRecord {
                object_id: row.object_id,
                entity_type,
                operation,
                description: row.description,
                timestamp: row.timestamp,
            },
        ))
    }
}

pub(super) fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn apply_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a AuditLogFilter) {
    builder.push(" WHERE 1 = 1");
    if let Some(object_id) = filter.object_id {
        builder.push(" AND object_id = ");
        builder.push_bind(object_id);
    }
    if let Some(kind) = filter.entity_type {
        builder.push(" AND entity_type = ");
        builder.push_bind(kind.as_str());
    }
    if let Some(operation) = filter.operation {
        builder.push(" AND operation = ");
        builder.push_bind(operation.as_str());
    }
    if let Some(from) = filter.from {
        builder.push(" AND timestamp >= ");
        builder.push_bind(from);
    }
    if let Some(to) = filter.to {
        builder.push(" AND timestamp < ");
        builder.push_bind(to);
    }
    if let Some(search) = filter.search.as_deref() {
        let pattern = like_pattern(search);
        builder.push(" AND (CAST(object_id AS TEXT) LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR entity_type LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR operation LIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" ESCAPE '\\' OR description LIKE ");
        builder.push_bind(pattern);
        builder.push(" ESCAPE '\\')");
    }
}

fn apply_cursor(builder: &mut QueryBuilder<'_, Sqlite>, order: SortOrder, cursor: &AuditLogCursor) {
    let cmp = match order {
        SortOrder::Desc => "<",
        SortOrder::Asc => ">",
    };
    builder.push(format!(" AND (timestamp {cmp} "));
    builder.push_bind(cursor.timestamp);
    builder.push(" OR (timestamp = ");
    builder.push_bind(cursor.timestamp);
    builder.push(format!(" AND id {cmp} "));
    builder.push_bind(cursor.id);
    builder.push("))");
}

#[async_trait]
impl AuditLogRepository for SqliteAuditLogRepository {
    async fn list(
        &self,
        filter: &AuditLogFilter,
        order: SortOrder,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditRecord>, Option<String>)> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_AUDIT);
        apply_filter(&mut builder, filter);
        if let Some(cursor) = &cursor {
            apply_cursor(&mut builder, order, cursor);
        }
        builder.push(match order {
            SortOrder::Desc => " ORDER BY timestamp DESC, id DESC",
            SortOrder::Asc => " ORDER BY timestamp ASC, id ASC",
        });
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit) + 1);

        let mut rows = builder
            .build_query_as::<AuditRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let has_more = rows.len() > limit as usize;
        rows.truncate(limit as usize);
        let records = rows
            .into_iter()
            .map(AuditRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let next_cursor = has_more
            .then(|| records.last())
            .flatten()
            .map(|last| AuditLogCursor::new(last.timestamp(), last.id()).encode());

        Ok((records, next_cursor))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AuditRecord>> {
        let row = sqlx::query_as::<_, AuditRow>(&format!("{SELECT_AUDIT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx)?;
        row.map(AuditRecord::try_from).transpose()
    }
}
