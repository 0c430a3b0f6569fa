// src/presentation/http/controllers/components.rs
use super::DeletedResponse;
use crate::application::{
    commands::catalog::{CreateComponentCommand, UpdateComponentCommand},
    dto::ComponentDto,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

/// Body shared by create and update; every field is optional for components.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ComponentRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub price: Option<f64>,
    pub specs: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/components",
    responses((status = 200, description = "Every component.", body = [ComponentDto])),
    tag = "Components"
)]
pub async fn list_components(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<Vec<ComponentDto>>> {
    state
        .services
        .catalog_queries
        .list_components()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/components/{id}",
    params(("id" = i64, Path, description = "Component identifier")),
    responses(
        (status = 200, description = "Component.", body = ComponentDto),
        (status = 404, description = "No such component.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Components"
)]
pub async fn get_component(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ComponentDto>> {
    state
        .services
        .catalog_queries
        .get_component(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/components",
    request_body = ComponentRequest,
    responses(
        (status = 201, description = "Component created and audited.", body = ComponentDto),
        (status = 400, description = "Invalid component.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Components"
)]
pub async fn create_component(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<ComponentRequest>,
) -> HttpResult<(StatusCode, Json<ComponentDto>)> {
    let command = CreateComponentCommand {
        name: payload.name,
        category: payload.category,
        brand: payload.brand,
        model: payload.model,
        price: payload.price,
        specs: payload.specs,
    };

    state
        .services
        .catalog_commands
        .create_component(command)
        .await
        .into_http()
        .map(|component| (StatusCode::CREATED, Json(component)))
}

#[utoipa::path(
    put,
    path = "/api/v1/components/{id}",
    params(("id" = i64, Path, description = "Component identifier")),
    request_body = ComponentRequest,
    responses(
        (status = 200, description = "Component after the update.", body = ComponentDto),
        (status = 404, description = "No such component.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Components"
)]
pub async fn update_component(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<ComponentRequest>,
) -> HttpResult<Json<ComponentDto>> {
    let command = UpdateComponentCommand {
        name: payload.name,
        category: payload.category,
        brand: payload.brand,
        model: payload.model,
        price: payload.price,
        specs: payload.specs,
    };

    state
        .services
        .catalog_commands
        .update_component(id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/components/{id}",
    params(("id" = i64, Path, description = "Component identifier")),
    responses(
        (status = 200, description = "Component and its stock entries deleted.", body = DeletedResponse),
        (status = 404, description = "No such component.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Components"
)]
pub async fn delete_component(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedResponse>> {
    state
        .services
        .catalog_commands
        .delete_component(id)
        .await
        .into_http()?;

    Ok(Json(DeletedResponse::new()))
}
