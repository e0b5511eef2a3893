//! User Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::application::dto::request::{CreateUserRequest, UpdateUserRequest};
use crate::application::dto::response::{ChatListResponse, UserEnvelope, UserListResponse};
use crate::presentation::http::extractors::{CurrentUser, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// List every user, sorted by id
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserListResponse>, AppError> {
    let users = state.users.get_all_users().await?;
    Ok(Json(users.into()))
}

/// Create a user with a client-supplied id
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<Json<UserEnvelope>, AppError> {
    let user = state.users.create_user(body.into()).await?;
    Ok(Json(user.into()))
}

/// Get current authenticated user
pub async fn get_current_user(CurrentUser(user): CurrentUser) -> Json<UserEnvelope> {
    Json(user.into())
}

/// Update current user profile
pub async fn update_current_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserEnvelope>, AppError> {
    let user = state.users.update_user(&user.id, body.into()).await?;
    Ok(Json(user.into()))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserEnvelope>, AppError> {
    let user = state.users.get_user_by_id(&user_id).await?;
    Ok(Json(user.into()))
}

/// Chats a user is a member of, sorted by name
pub async fn get_user_chats(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ChatListResponse>, AppError> {
    let chats = state.users.get_chats_with_user(&user_id).await?;
    Ok(Json(chats.into()))
}
