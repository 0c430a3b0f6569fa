// src/presentation/http/controllers/facilities.rs
use super::DeletedResponse;
use crate::application::{
    commands::catalog::{CreateFacilityCommand, UpdateFacilityCommand},
    dto::{FacilityDto, FacilityInventoryDto, MapDataDto},
    queries::catalog::ListFacilitiesQuery,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFacilityRequest {
    pub name: String,
    pub contact_info: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    /// Defaults to `true`.
    pub is_operating: Option<bool>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state_province_region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateFacilityRequest {
    pub name: Option<String>,
    pub contact_info: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub is_operating: Option<bool>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state_province_region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListFacilitiesParams {
    /// Case-insensitive substring of the name, contact info, city, region or
    /// country.
    pub q: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state_province_region: Option<String>,
    pub country: Option<String>,
    pub is_operating: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/v1/facilities",
    params(ListFacilitiesParams),
    responses((
        status = 200,
        description = "Matching production facilities, operating ones first.",
        body = [FacilityDto]
    )),
    tag = "Facilities"
)]
pub async fn list_facilities(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListFacilitiesParams>,
) -> HttpResult<Json<Vec<FacilityDto>>> {
    let query = ListFacilitiesQuery {
        q: params.q,
        name: params.name,
        city: params.city,
        state_province_region: params.state_province_region,
        country: params.country,
        is_operating: params.is_operating,
    };
    state
        .services
        .catalog_queries
        .list_facilities(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/facilities/{id}",
    params(("id" = i64, Path, description = "Facility identifier")),
    responses(
        (status = 200, description = "Facility.", body = FacilityDto),
        (status = 404, description = "No such facility.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Facilities"
)]
pub async fn get_facility(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<FacilityDto>> {
    state
        .services
        .catalog_queries
        .get_facility(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/facilities/map-data",
    responses((status = 200, description = "Parallel coordinate and label arrays for plotting.", body = MapDataDto)),
    tag = "Facilities"
)]
pub async fn map_data(Extension(state): Extension<HttpState>) -> HttpResult<Json<MapDataDto>> {
    state
        .services
        .catalog_queries
        .map_data()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/facilities/{id}/inventory",
    params(("id" = i64, Path, description = "Facility identifier")),
    responses(
        (status = 200, description = "Stock held at the facility.", body = FacilityInventoryDto),
        (status = 404, description = "No such facility.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Facilities"
)]
pub async fn facility_inventory(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<FacilityInventoryDto>> {
    state
        .services
        .catalog_queries
        .facility_inventory(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/facilities",
    request_body = CreateFacilityRequest,
    responses(
        (status = 201, description = "Facility created and audited.", body = FacilityDto),
        (status = 400, description = "Invalid facility.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Facilities"
)]
pub async fn create_facility(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateFacilityRequest>,
) -> HttpResult<(StatusCode, Json<FacilityDto>)> {
    let command = CreateFacilityCommand {
        name: payload.name,
        contact_info: payload.contact_info,
        longitude: payload.longitude,
        latitude: payload.latitude,
        is_operating: payload.is_operating,
        street_address: payload.street_address,
        city: payload.city,
        state_province_region: payload.state_province_region,
        postal_code: payload.postal_code,
        country: payload.country,
        notes: payload.notes,
    };

    state
        .services
        .catalog_commands
        .create_facility(command)
        .await
        .into_http()
        .map(|facility| (StatusCode::CREATED, Json(facility)))
}

#[utoipa::path(
    put,
    path = "/api/v1/facilities/{id}",
    params(("id" = i64, Path, description = "Facility identifier")),
    request_body = UpdateFacilityRequest,
    responses(
        (status = 200, description = "Facility after the update.", body = FacilityDto),
        (status = 404, description = "No such facility.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Facilities"
)]
pub async fn update_facility(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateFacilityRequest>,
) -> HttpResult<Json<FacilityDto>> {
    let command = UpdateFacilityCommand {
        name: payload.name,
        contact_info: payload.contact_info,
        longitude: payload.longitude,
        latitude: payload.latitude,
        is_operating: payload.is_operating,
        street_address: payload.street_address,
        city: payload.city,
        state_province_region: payload.state_province_region,
        postal_code: payload.postal_code,
        country: payload.country,
        notes: payload.notes,
    };

    state
        .services
        .catalog_commands
        .update_facility(id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/facilities/{id}",
    params(("id" = i64, Path, description = "Facility identifier")),
    responses(
        (status = 200, description = "Facility and every stock entry it held deleted.", body = DeletedResponse),
        (status = 404, description = "No such facility.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Facilities"
)]
pub async fn delete_facility(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedResponse>> {
    state
        .services
        .catalog_commands
        .delete_facility(id)
        .await
        .into_http()?;

    Ok(Json(DeletedResponse::new()))
}
