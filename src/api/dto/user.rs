//! DTOs for user account endpoints.
//!
//! Required string fields default to empty when absent so that a missing
//! field fails `validator` rules with `400` rather than a JSON rejection.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::domain::entities::PublicUser;

/// Request body for `POST /users/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 64, message = "username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(email(message = "a valid email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Response for `POST /users/register`.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: PublicUser,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Response for `POST /users/login`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Response for `GET /users/profile`.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: PublicUser,
}

/// Request body for `PUT /users/profile`.
///
/// Absent and empty fields are both left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(max = 64, message = "username must be at most 64 characters"))]
    pub username: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "email_or_empty", message = "a valid email is required"))]
    pub email: Option<String>,
}

// Empty means "leave unchanged", so only a non-empty value must be an address.
fn email_or_empty(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email"))
    }
}

/// Generic acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response for `POST /users/api-key`.
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    pub api_key: String,
}
