// src/presentation/http/controllers/audit.rs
use crate::application::{
    dto::AuditRecordDto,
    queries::audit::{ListAuditRecordsQuery, ObjectHistoryQuery},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::openapi::AuditRecordPage;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ListAuditParams {
    pub object_id: Option<i64>,
    /// One of `product`, `component`, `facility`, `user`,
    /// `product_inventory`, `component_inventory`.
    pub entity_type: Option<String>,
    /// `insert`, `update` or `delete`.
    pub operation: Option<String>,
    /// Inclusive lower bound, RFC 3339.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound, RFC 3339.
    pub to: Option<DateTime<Utc>>,
    /// Case-insensitive substring matched against every column.
    pub q: Option<String>,
    /// `asc` or `desc` (default).
    pub order: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub cursor: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HistoryParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub cursor: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-records",
    params(ListAuditParams),
    responses(
        (status = 200, description = "Page of audit records.", body = AuditRecordPage),
        (status = 400, description = "Invalid filter or cursor.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Unexpected server error.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn list_audit_records(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<AuditRecordPage>> {
    let query = ListAuditRecordsQuery {
        object_id: params.object_id,
        entity_type: params.entity_type,
        operation: params.operation,
        from: params.from,
        to: params.to,
        q: params.q,
        order: params.order,
        limit: params.limit,
        cursor: params.cursor,
    };

    state
        .services
        .audit_queries
        .list_records(query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-records/{id}",
    params(("id" = i64, Path, description = "Audit record identifier")),
    responses(
        (status = 200, description = "Audit record.", body = AuditRecordDto),
        (status = 404, description = "No such record.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn get_audit_record(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<AuditRecordDto>> {
    state
        .services
        .audit_queries
        .get_record(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/audit-records/{entity_type}/{object_id}",
    params(
        ("entity_type" = String, Path, description = "Entity kind"),
        ("object_id" = i64, Path, description = "Primary key of the audited row"),
        HistoryParams
    ),
    responses(
        (status = 200, description = "History of one row, newest first.", body = AuditRecordPage),
        (status = 400, description = "Unknown entity type.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Audit"
)]
pub async fn object_history(
    Extension(state): Extension<HttpState>,
    Path((entity_type, object_id)): Path<(String, i64)>,
    Query(params): Query<HistoryParams>,
) -> HttpResult<Json<AuditRecordPage>> {
    let query = ObjectHistoryQuery {
        entity_type,
        object_id,
        limit: params.limit,
        cursor: params.cursor,
    };

    state
        .services
        .audit_queries
        .object_history(query)
        .await
        .into_http()
        .map(|page| Json(page.into()))
}
