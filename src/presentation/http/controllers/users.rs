// src/presentation/http/controllers/users.rs
use super::DeletedResponse;
use crate::application::{
    commands::catalog::{CreateUserCommand, UpdateUserCommand},
    dto::UserDto,
};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Path, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub username: String,
    /// Plain password; only its argon2 hash is stored.
    pub password: String,
    pub role: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses((status = 200, description = "Every user.", body = [UserDto])),
    tag = "Users"
)]
pub async fn list_users(Extension(state): Extension<HttpState>) -> HttpResult<Json<Vec<UserDto>>> {
    state
        .services
        .catalog_queries
        .list_users()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User.", body = UserDto),
        (status = 404, description = "No such user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn get_user(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<UserDto>> {
    state
        .services
        .catalog_queries
        .get_user(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created and audited.", body = UserDto),
        (status = 400, description = "Invalid user or weak password.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Username already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn create_user(
    Extension(state): Extension<HttpState>,
    Json(payload): Json<CreateUserRequest>,
) -> HttpResult<(StatusCode, Json<UserDto>)> {
    let command = CreateUserCommand {
        username: payload.username,
        password: payload.password,
        role: payload.role,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
        email: payload.email,
        title: payload.title,
    };

    state
        .services
        .catalog_commands
        .create_user(command)
        .await
        .into_http()
        .map(|user| (StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User after the update.", body = UserDto),
        (status = 404, description = "No such user.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Username already taken.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn update_user(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> HttpResult<Json<UserDto>> {
    let command = UpdateUserCommand {
        username: payload.username,
        password: payload.password,
        role: payload.role,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone_number: payload.phone_number,
        email: payload.email,
        title: payload.title,
    };

    state
        .services
        .catalog_commands
        .update_user(id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted.", body = DeletedResponse),
        (status = 404, description = "No such user.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn delete_user(
    Extension(state): Extension<HttpState>,
    Path(id): Path<i64>,
) -> HttpResult<Json<DeletedResponse>> {
    state
        .services
        .catalog_commands
        .delete_user(id)
        .await
        .into_http()?;

    Ok(Json(DeletedResponse::new()))
}
