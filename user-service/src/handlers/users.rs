//! CRUD handlers for `/api/v1/users`.
//!
//! Each handler performs exactly one store call. Malformed ids and bodies are
//! rejected with 400 before the store is contacted.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::{
    dtos::{
        parse_user_id, CreateUserRequest, InsertUserResponse, UpdateUserRequest, UserResponse,
        DELETED_MESSAGE,
    },
    models::User,
    services::metrics,
    startup::AppState,
    utils::JsonBody,
};

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.store.list().await?;

    tracing::debug!(count = users.len(), "Listed users");

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<InsertUserResponse>), AppError> {
    let id = state.store.insert(User::from(payload)).await?;

    tracing::info!(user_id = %id, "Created user");
    metrics::record_user_created();

    Ok((StatusCode::CREATED, Json(InsertUserResponse::from(id))))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let id = parse_user_id(&user_id)?;

    if payload.is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Update must include firstName or lastName"
        )));
    }

    let user = state
        .store
        .update(id, &payload)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User {} not found", id)))?;

    tracing::info!(user_id = %id, "Updated user");
    metrics::record_user_updated();

    Ok(Json(UserResponse::from(user)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<&'static str>, AppError> {
    let id = parse_user_id(&user_id)?;

    state
        .store
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User {} not found", id)))?;

    tracing::info!(user_id = %id, "Deleted user");
    metrics::record_user_deleted();

    Ok(Json(DELETED_MESSAGE))
}
