// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{audit, components, facilities, inventory, products, users},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .route("/api/v1/audit-records", get(audit::list_audit_records))
        .route("/api/v1/audit-records/{id}", get(audit::get_audit_record))
        .route(
            "/api/v1/audit-records/{entity_type}/{object_id}",
            get(audit::object_history),
        )
        .route(
            "/api/v1/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/v1/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route(
            "/api/v1/components",
            get(components::list_components).post(components::create_component),
        )
        .route(
            "/api/v1/components/{id}",
            get(components::get_component)
                .put(components::update_component)
                .delete(components::delete_component),
        )
        .route(
            "/api/v1/facilities",
            get(facilities::list_facilities).post(facilities::create_facility),
        )
        .route("/api/v1/facilities/map-data", get(facilities::map_data))
        .route(
            "/api/v1/facilities/{id}",
            get(facilities::get_facility)
                .put(facilities::update_facility)
                .delete(facilities::delete_facility),
        )
        .route(
            "/api/v1/facilities/{id}/inventory",
            get(facilities::facility_inventory),
        )
        .route(
            "/api/v1/users",
            get(users::list_users).post(users::create_user),
        )
        .route(
            "/api/v1/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/v1/inventory/products",
            post(inventory::create_product_stock),
        )
        .route(
            "/api/v1/inventory/components",
            post(inventory::create_component_stock),
        )
        .route(
            "/api/v1/inventory/save-changes",
            post(inventory::save_changes),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer(allowed_origins))
        .layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
