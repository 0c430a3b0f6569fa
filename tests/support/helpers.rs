// tests/support/helpers.rs
use super::mocks;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use nexus_inventory::application::{
    audit::{MutationHookDispatcher, register_tracked_entities},
    ports::{security::PasswordHasher, time::Clock},
    services::ApplicationServices,
};
use nexus_inventory::domain::{audit::AuditLogRepository, record::RecordStore};
use nexus_inventory::infrastructure::{
    database,
    repositories::{InMemoryStore, SqliteAuditLogRepository, SqliteRecordStore},
};
use nexus_inventory::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;

pub fn dispatcher(clock: Arc<dyn Clock>, track_inventory: bool) -> Arc<MutationHookDispatcher> {
    Arc::new(
        register_tracked_entities(MutationHookDispatcher::builder(clock), track_inventory).build(),
    )
}

pub fn build_services(
    record_store: Arc<dyn RecordStore>,
    audit_log_repo: Arc<dyn AuditLogRepository>,
    track_inventory: bool,
) -> ApplicationServices {
    let clock: Arc<dyn Clock> = Arc::new(mocks::SteppingClock::new());
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(mocks::DummyPasswordHasher);
    ApplicationServices::new(
        record_store,
        audit_log_repo,
        dispatcher(Arc::clone(&clock), track_inventory),
        password_hasher,
        clock,
    )
}

/// Services over a fresh in-memory store, plus the store for inspection.
pub fn memory_services() -> (ApplicationServices, InMemoryStore) {
    let store = InMemoryStore::new();
    let services = build_services(Arc::new(store.clone()), Arc::new(store.clone()), true);
    (services, store)
}

/// A migrated private SQLite database. One connection, so every query sees
/// the same `:memory:` database.
pub async fn sqlite_pool() -> SqlitePool {
    let pool = database::init_pool("sqlite::memory:", 1)
        .await
        .expect("open sqlite::memory:");
    database::run_migrations(&pool)
        .await
        .expect("run migrations");
    pool
}

pub async fn sqlite_services() -> (ApplicationServices, SqlitePool) {
    let pool = sqlite_pool().await;
    let services = build_services(
        Arc::new(SqliteRecordStore::new(pool.clone())),
        Arc::new(SqliteAuditLogRepository::new(pool.clone())),
        true,
    );
    (services, pool)
}

pub fn make_test_router() -> (axum::Router, InMemoryStore) {
    let (services, store) = memory_services();
    let state = HttpState::new(services);
    let origins = vec!["http://localhost:3000".to_string()];
    (build_router(state, &origins), store)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

/// Status and JSON body of a response.
pub async fn read_json(resp: axum::response::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).expect("expected JSON body");
    (status, json)
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    assert_eq!(resp.status(), expected_status);
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json: Value = serde_json::from_slice(&body_bytes).expect("expected valid json body for error");
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field in ErrorResponse");
}
