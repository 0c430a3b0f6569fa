// src/presentation/http/openapi.rs
use crate::application::dto::{AuditRecordDto, CursorPage};
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::{OpenApi, ToSchema};

/// Default output of [`write_openapi_snapshot`].
pub const DEFAULT_SNAPSHOT_PATH: &str = "openapi.json";

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuditRecordPage {
    pub items: Vec<AuditRecordDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::audit::list_audit_records,
        crate::presentation::http::controllers::audit::get_audit_record,
        crate::presentation::http::controllers::audit::object_history,
        crate::presentation::http::controllers::products::list_products,
        crate::presentation::http::controllers::products::get_product,
        crate::presentation::http::controllers::products::create_product,
        crate::presentation::http::controllers::products::update_product,
        crate::presentation::http::controllers::products::delete_product,
        crate::presentation::http::controllers::components::list_components,
        crate::presentation::http::controllers::components::get_component,
        crate::presentation::http::controllers::components::create_component,
        crate::presentation::http::controllers::components::update_component,
        crate::presentation::http::controllers::components::delete_component,
        crate::presentation::http::controllers::facilities::list_facilities,
        crate::presentation::http::controllers::facilities::get_facility,
        crate::presentation::http::controllers::facilities::map_data,
        crate::presentation::http::controllers::facilities::facility_inventory,
        crate::presentation::http::controllers::facilities::create_facility,
        crate::presentation::http::controllers::facilities::update_facility,
        crate::presentation::http::controllers::facilities::delete_facility,
        crate::presentation::http::controllers::users::list_users,
        crate::presentation::http::controllers::users::get_user,
        crate::presentation::http::controllers::users::create_user,
        crate::presentation::http::controllers::users::update_user,
        crate::presentation::http::controllers::users::delete_user,
        crate::presentation::http::controllers::inventory::create_product_stock,
        crate::presentation::http::controllers::inventory::create_component_stock,
        crate::presentation::http::controllers::inventory::save_changes
    ),
    components(
        schemas(
            StatusResponse,
            AuditRecordPage,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::DeletedResponse,
            crate::presentation::http::controllers::audit::ListAuditParams,
            crate::presentation::http::controllers::audit::HistoryParams,
            crate::presentation::http::controllers::products::ListProductsParams,
            crate::presentation::http::controllers::products::CreateProductRequest,
            crate::presentation::http::controllers::products::UpdateProductRequest,
            crate::presentation::http::controllers::components::ComponentRequest,
            crate::presentation::http::controllers::facilities::ListFacilitiesParams,
            crate::presentation::http::controllers::facilities::CreateFacilityRequest,
            crate::presentation::http::controllers::facilities::UpdateFacilityRequest,
            crate::presentation::http::controllers::users::CreateUserRequest,
            crate::presentation::http::controllers::users::UpdateUserRequest,
            crate::presentation::http::controllers::inventory::CreateProductStockRequest,
            crate::presentation::http::controllers::inventory::CreateComponentStockRequest,
            crate::presentation::http::controllers::inventory::StockChangeRequest,
            crate::presentation::http::controllers::inventory::SaveChangesRequest,
            crate::application::dto::AuditRecordDto,
            crate::application::dto::ProductDto,
            crate::application::dto::ComponentDto,
            crate::application::dto::FacilityDto,
            crate::application::dto::UserDto,
            crate::application::dto::MapDataDto,
            crate::application::dto::ProductStockDto,
            crate::application::dto::ComponentStockDto,
            crate::application::dto::FacilityInventoryDto,
            crate::application::dto::SaveChangesReportDto
        )
    ),
    tags(
        (name = "Audit", description = "Read-only change audit log"),
        (name = "Products", description = "Product catalog"),
        (name = "Components", description = "Component catalog"),
        (name = "Facilities", description = "Production facilities"),
        (name = "Users", description = "User accounts"),
        (name = "Inventory", description = "Per-facility stock levels"),
        (name = "System", description = "System level endpoints")
    ),
    info(
        title = "Nexus Inventory API",
        description = "Multi-facility inventory with a row-level change audit",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new().route("/openapi.json", get(serve_openapi))
}

/// Write the OpenAPI document to `OPENAPI_SNAPSHOT_PATH` and return the path
/// written.
pub fn write_openapi_snapshot() -> std::io::Result<String> {
    let doc = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| DEFAULT_SNAPSHOT_PATH.to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &doc)?;
    Ok(output_path)
}

impl From<CursorPage<AuditRecordDto>> for AuditRecordPage {
    fn from(page: CursorPage<AuditRecordDto>) -> Self {
        Self {
            items: page.items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_audit_and_inventory_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/health",
            "/api/v1/audit-records",
            "/api/v1/audit-records/{id}",
            "/api/v1/audit-records/{entity_type}/{object_id}",
            "/api/v1/facilities/map-data",
            "/api/v1/inventory/save-changes",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }
    }
}
