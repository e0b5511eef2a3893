//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::{ChatPatch, CreateUser, NewChat, UserPatch};

/// Ids that would be shadowed by static routes under `/users`.
const RESERVED_USER_IDS: &[&str] = &["me"];

fn validate_user_id(id: &str) -> Result<(), ValidationError> {
    if RESERVED_USER_IDS.contains(&id) {
        let mut error = ValidationError::new("reserved");
        error.message = Some(format!("Id '{}' is reserved", id).into());
        return Err(error);
    }
    Ok(())
}

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        length(min = 1, max = 64, message = "Id must be 1-64 characters"),
        custom(function = "validate_user_id")
    )]
    pub id: String,

    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            id: req.id,
            username: req.username,
            email: req.email,
        }
    }
}

/// Update user request. Omitted fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
        }
    }
}

/// Create chat request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChatRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Members besides the caller, who is always added.
    #[serde(default)]
    pub user_ids: Vec<String>,
}

impl From<CreateChatRequest> for NewChat {
    fn from(req: CreateChatRequest) -> Self {
        Self {
            name: req.name,
            user_ids: req.user_ids,
        }
    }
}

/// Update chat request
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateChatRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
}

impl From<UpdateChatRequest> for ChatPatch {
    fn from(req: UpdateChatRequest) -> Self {
        Self { name: req.name }
    }
}

/// Add member request
#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(length(min = 1, message = "User id must not be empty"))]
    pub user_id: String,
}

/// Post or edit message request. Length is checked after trimming by the
/// message service.
#[derive(Debug, Deserialize, Validate)]
pub struct MessageRequest {
    #[validate(length(min = 1, message = "Text must not be empty"))]
    pub text: String,
}
