// src/presentation/http/controllers/products.rs
use super::DeletedResponse;
use crate::application::{
    commands::catalog::{CreateProductCommand, UpdateProductCommand},
    dto::ProductDto,
    queries::catalog::ListProductsQuery,
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
pub struct CreateProductRequest {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: String,
    pub price: f64,
    pub specs: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub specs: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListProductsParams {
    /// Case-insensitive substring of the id, category, brand or model.
    pub q: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub available: Option<bool>,
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ListProductsParams),
    responses((status = 200, description = "Matching products by id.", body = [ProductDto])),
    tag = "Products"
)]
pub async fn list_products(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListProductsParams>,
) -> HttpResult<Json<Vec<ProductDto>>> {
    let query = ListProductsQuery {
        q: params.q,
        category: params.category,
        brand: params.brand,
        available: params.available,
    };
    state
        .services
        .catalog_queries
        .list_products(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product.", body = ProductDto),
        (status = 404, description = "No such product.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<ProductDto>> {
    state
        .services
        .catalog_queries
        .get_product(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created and audited.", body = ProductDto),
        (status = 400, description = "Invalid product.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn create_product(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateProductRequest>,
) -> HttpResult<(StatusCode, Json<ProductDto>)> {
    let command = CreateProductCommand {
        brand: payload.brand,
        model: payload.model,
        category: payload.category,
        price: payload.price,
        specs: payload.specs,
        notes: payload.notes,
        image_url: payload.image_url,
        available: payload.available,
    };

    state
        .services
        .catalog_commands
        .create_product(command)
        .await
        .into_http()
        .map(|product| (StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product after the update.", body = ProductDto),
        (status = 404, description = "No such product.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn update_product(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> HttpResult<Json<ProductDto>> {
    let command = UpdateProductCommand {
        brand: payload.brand,
        model: payload.model,
        category: payload.category,
        price: payload.price,
        specs: payload.specs,
        notes: payload.notes,
        image_url: payload.image_url,
        available: payload.available,
    };

    state
        .services
        .catalog_commands
        .update_product(id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product and its stock entries deleted.", body = DeletedResponse),
        (status = 404, description = "No such product.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn delete_product(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedResponse>> {
    state
        .services
        .catalog_commands
        .delete_product(id)
        .await
        .into_http()?;

    Ok(Json(DeletedResponse::new()))
}
