//! 用户处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};

use super::model::{User, UserPayload};
use crate::app::AppState;
use crate::core::error::CoreError;

/// 请求体无法解析（非 JSON 或字段类型错误）统一按 400 处理
fn read_payload(
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<UserPayload, CoreError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| CoreError::Validation(rejection.body_text()))
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, CoreError> {
    let users = state.user_service.list_users().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, CoreError> {
    let user = state.user_service.get_user(&id).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), CoreError> {
    let user = state.user_service.create_user(read_payload(payload)?).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<User>, CoreError> {
    let user = state
        .user_service
        .update_user(&id, read_payload(payload)?)
        .await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CoreError> {
    state.user_service.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
