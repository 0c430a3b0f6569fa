// src/presentation/http/controllers/inventory.rs
use crate::application::{
    commands::catalog::{
        CreateComponentStockCommand, CreateProductStockCommand, SaveChangesCommand, StockChange,
    },
    dto::{ComponentStockDto, ProductStockDto, SaveChangesReportDto},
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductStockRequest {
    pub product_id: i64,
    pub production_facility_id: i64,
    pub count: i64,
    pub last_updated_by_user_id: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateComponentStockRequest {
    pub component_id: i64,
    pub production_facility_id: i64,
    pub count: i64,
    pub last_updated_by_user_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockChangeRequest {
    /// `product` or `component`.
    #[serde(rename = "type")]
    pub entry_type: String,
    pub entry_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SaveChangesRequest {
    #[serde(default)]
    pub changes_list: Vec<StockChangeRequest>,
    /// Recorded as `last_updated_by_user_id` on every changed entry.
    pub updated_by: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/products",
    request_body = CreateProductStockRequest,
    responses(
        (status = 201, description = "Stock entry created.", body = ProductStockDto),
        (status = 404, description = "Product or facility missing.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Inventory"
)]
pub async fn create_product_stock(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateProductStockRequest>,
) -> HttpResult<(StatusCode, Json<ProductStockDto>)> {
    let command = CreateProductStockCommand {
        product_id: payload.product_id,
        production_facility_id: payload.production_facility_id,
        count: payload.count,
        updated_by: payload.last_updated_by_user_id,
    };

    state
        .services
        .catalog_commands
        .create_product_stock(command)
        .await
        .into_http()
        .map(|entry| (StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/components",
    request_body = CreateComponentStockRequest,
    responses(
        (status = 201, description = "Stock entry created.", body = ComponentStockDto),
        (status = 404, description = "Component or facility missing.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Inventory"
)]
pub async fn create_component_stock(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateComponentStockRequest>,
) -> HttpResult<(StatusCode, Json<ComponentStockDto>)> {
    let command = CreateComponentStockCommand {
        component_id: payload.component_id,
        production_facility_id: payload.production_facility_id,
        count: payload.count,
        updated_by: payload.last_updated_by_user_id,
    };

    state
        .services
        .catalog_commands
        .create_component_stock(command)
        .await
        .into_http()
        .map(|entry| (StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    post,
    path = "/api/v1/inventory/save-changes",
    request_body = SaveChangesRequest,
    responses(
        (status = 200, description = "Per-entry outcome; failed entries are listed in `errors`.", body = SaveChangesReportDto),
        (status = 400, description = "Malformed request.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Inventory"
)]
pub async fn save_changes(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<SaveChangesRequest>,
) -> HttpResult<Json<SaveChangesReportDto>> {
    let changes = payload
        .changes_list
        .into_iter()
        .map(|change| StockChange {
            entry_type: change.entry_type,
            entry_id: change.entry_id,
            quantity: change.quantity,
        })
        .collect();

    state
        .services
        .catalog_commands
        .save_changes(SaveChangesCommand {
            changes,
            updated_by: payload.updated_by,
        })
        .await
        .into_http()
        .map(Json)
}
