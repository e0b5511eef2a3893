//! Chat Handlers
//!
//! Chat-scoped routes go through the guard first: membership for reads and
//! edits, ownership for deleting the chat or removing members.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{AddMemberRequest, CreateChatRequest, UpdateChatRequest};
use crate::application::dto::response::{ChatEnvelope, ChatListResponse, UserListResponse};
use crate::presentation::http::extractors::{CurrentUser, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Chats of the caller, sorted by name
pub async fn list_chats(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ChatListResponse>, AppError> {
    let chats = state.users.get_chats_with_user(&user.id).await?;
    Ok(Json(chats.into()))
}

/// Create a chat owned by the caller
pub async fn create_chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(body): ValidatedJson<CreateChatRequest>,
) -> Result<(StatusCode, Json<ChatEnvelope>), AppError> {
    let chat = state.chats.create_chat(&user, body.into()).await?;
    Ok((StatusCode::CREATED, Json(chat.into())))
}

/// Get a chat the caller belongs to
pub async fn get_chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<Json<ChatEnvelope>, AppError> {
    let chat = state.guard.authorize(&chat_id, &user).await?;
    Ok(Json(chat.into()))
}

/// Rename a chat
pub async fn update_chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
    ValidatedJson(body): ValidatedJson<UpdateChatRequest>,
) -> Result<Json<ChatEnvelope>, AppError> {
    let chat = state.guard.authorize(&chat_id, &user).await?;
    let chat = state.chats.update_chat(&chat.id, body.into()).await?;
    Ok(Json(chat.into()))
}

/// Delete a chat (owner only)
pub async fn delete_chat(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let chat = state.guard.authorize_owner(&chat_id, &user).await?;
    state.chats.delete_chat(&chat.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Members of a chat, sorted by id
pub async fn get_chat_users(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<Json<UserListResponse>, AppError> {
    let chat = state.guard.authorize(&chat_id, &user).await?;
    let users = state.chats.get_users_in_chat(&chat.id).await?;
    Ok(Json(users.into()))
}

/// Add a member to a chat
pub async fn add_chat_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
    ValidatedJson(body): ValidatedJson<AddMemberRequest>,
) -> Result<Json<UserListResponse>, AppError> {
    let chat = state.guard.authorize(&chat_id, &user).await?;
    let users = state.chats.add_member(&chat.id, &body.user_id).await?;
    Ok(Json(users.into()))
}

/// Remove a member from a chat (owner only)
pub async fn remove_chat_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((chat_id, user_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let chat = state.guard.authorize_owner(&chat_id, &user).await?;
    state.chats.remove_member(&chat.id, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
