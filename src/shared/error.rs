//! Application Error Types
//!
//! Centralized error handling with Axum integration.
//!
//! Lookup misses, uniqueness violations and permission failures each carry
//! their own response body so handlers can surface them verbatim.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::infrastructure::metrics;

/// Kind of persisted entity named in lookup and uniqueness errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Chat,
    Message,
    ChatMembership,
}

impl EntityKind {
    /// Name rendered as `entity_name` in error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Chat => "Chat",
            Self::Message => "Message",
            Self::ChatMembership => "ChatMembership",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{entity} with id {id} not found")]
    EntityNotFound { entity: EntityKind, id: String },

    #[error("{entity} with id {id} already exists")]
    DuplicateEntity { entity: EntityKind, id: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {} invalid field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::EntityNotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn duplicate(entity: EntityKind, id: impl Into<String>) -> Self {
        Self::DuplicateEntity {
            entity,
            id: id.into(),
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::EntityNotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::Validation(_) | Self::InvalidFields(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) | Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label used by the access denial counter, `None` for non-access failures.
    fn denial_kind(&self) -> Option<&'static str> {
        match self {
            Self::EntityNotFound { .. } => Some("entity_not_found"),
            Self::DuplicateEntity { .. } => Some("duplicate_entity"),
            Self::Forbidden(_) => Some("no_permission"),
            Self::Unauthenticated(_) => Some("not_authenticated"),
            _ => None,
        }
    }
}

/// Generic error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

/// Field-level validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let Some(kind) = self.denial_kind() {
            metrics::record_access_denial(kind);
        }

        let body = match &self {
            AppError::EntityNotFound { entity, id } => json!({
                "detail": {
                    "type": "entity_not_found",
                    "entity_name": entity.as_str(),
                    "entity_id": id,
                }
            }),
            AppError::DuplicateEntity { entity, id } => json!({
                "detail": {
                    "type": "duplicate_entity",
                    "entity_name": entity.as_str(),
                    "entity_id": id,
                }
            }),
            AppError::Forbidden(description) => json!({
                "error": "no_permission",
                "error_description": description,
            }),
            AppError::Unauthenticated(description) => json!({
                "error": "not_authenticated",
                "error_description": description,
            }),
            AppError::BadRequest(msg) => json!(ErrorResponse {
                code: 10002,
                message: msg.clone(),
                errors: None,
            }),
            AppError::Validation(msg) => json!(ErrorResponse {
                code: 10007,
                message: msg.clone(),
                errors: None,
            }),
            AppError::InvalidFields(errors) => json!(ErrorResponse {
                code: 10007,
                message: errors
                    .first()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .unwrap_or_else(|| "Validation failed".into()),
                errors: Some(errors.clone()),
            }),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                json!(ErrorResponse {
                    code: 10000,
                    message: "Internal server error".into(),
                    errors: None,
                })
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                json!(ErrorResponse {
                    code: 10000,
                    message: "Internal server error".into(),
                    errors: None,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
