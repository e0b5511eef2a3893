//! Message Handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::MessageRequest;
use crate::application::dto::response::{MessageEnvelope, MessageListResponse};
use crate::presentation::http::extractors::{CurrentUser, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Messages of a chat, oldest first
pub async fn get_messages(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
) -> Result<Json<MessageListResponse>, AppError> {
    let chat = state.guard.authorize(&chat_id, &user).await?;
    let messages = state.messages.get_messages_in_chat(&chat.id).await?;
    Ok(Json(messages.into()))
}

/// Post a message to a chat
pub async fn send_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(chat_id): Path<String>,
    ValidatedJson(body): ValidatedJson<MessageRequest>,
) -> Result<(StatusCode, Json<MessageEnvelope>), AppError> {
    let chat = state.guard.authorize(&chat_id, &user).await?;
    let message = state.messages.add_message(&user, &chat.id, &body.text).await?;
    Ok((StatusCode::CREATED, Json(message.into())))
}

/// Edit a message
pub async fn update_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((chat_id, message_id)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<MessageRequest>,
) -> Result<Json<MessageEnvelope>, AppError> {
    let chat = state.guard.authorize(&chat_id, &user).await?;
    let message = state
        .messages
        .update_message(&chat.id, &message_id, &user.id, &body.text)
        .await?;
    Ok(Json(message.into()))
}

/// Delete a message
pub async fn delete_message(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path((chat_id, message_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let chat = state.guard.authorize(&chat_id, &user).await?;
    state
        .messages
        .delete_message(&chat.id, &message_id, &user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
