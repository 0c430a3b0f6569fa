use super::{AuditQueryService, common};
use crate::{
    application::{
        dto::{AuditRecordDto, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        audit::{AuditLogFilter, AuditOperation, SortOrder},
        schema::EntityKind,
    },
};
use chrono::{DateTime, Utc};

#[derive(Debug, Default)]
pub struct ListAuditRecordsQuery {
    pub object_id: Option<i64>,
    pub entity_type: Option<String>,
    pub operation: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub q: Option<String>,
    pub order: Option<String>,
    pub limit: u32,
    pub cursor: Option<String>,
}

#[derive(Debug)]
pub struct ObjectHistoryQuery {
    pub entity_type: String,
    pub object_id: i64,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl AuditQueryService {
    pub async fn list_records(
        &self,
        query: ListAuditRecordsQuery,
    ) -> ApplicationResult<CursorPage<AuditRecordDto>> {
        common::ensure_window(query.from, query.to)?;
        let filter = AuditLogFilter {
            object_id: query.object_id,
            entity_type: query
                .entity_type
                .as_deref()
                .map(str::parse::<EntityKind>)
                .transpose()?,
            operation: query
                .operation
                .as_deref()
                .map(str::parse::<AuditOperation>)
                .transpose()?,
            from: query.from,
            to: query.to,
            search: query.q.filter(|q| !q.trim().is_empty()),
        };
        let order = SortOrder::parse(query.order.as_deref())
            .ok_or_else(|| ApplicationError::validation("order must be `asc` or `desc`"))?;
        self.page(&filter, order, query.limit, query.cursor.as_deref())
            .await
    }

    /// Every record of one object, most recent first.
    pub async fn object_history(
        &self,
        query: ObjectHistoryQuery,
    ) -> ApplicationResult<CursorPage<AuditRecordDto>> {
        let kind = query.entity_type.parse::<EntityKind>()?;
        let filter = AuditLogFilter::for_object(kind, query.object_id);
        self.page(&filter, SortOrder::Desc, query.limit, query.cursor.as_deref())
            .await
    }

    pub async fn get_record(&self, id: i64) -> ApplicationResult<AuditRecordDto> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found(format!("audit record {id} not found")))
    }

    async fn page(
        &self,
        filter: &AuditLogFilter,
        order: SortOrder,
        limit: u32,
        cursor: Option<&str>,
    ) -> ApplicationResult<CursorPage<AuditRecordDto>> {
        let limit = common::normalize_limit(limit);
        let typed_cursor = cursor.map(Self::decode_cursor).transpose()?;
        let (items, next_cursor) = self
            .repo
            .list(filter, order, limit, typed_cursor)
            .await
            .map_err(ApplicationError::from)?;
        Ok(CursorPage::new(items, next_cursor).map(AuditRecordDto::from))
    }
}
