//! Handlers for user accounts.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::user::{
    ApiKeyResponse, LoginRequest, LoginResponse, MessageResponse, ProfileResponse,
    RegisterRequest, RegisterResponse, UpdateProfileRequest,
};
use crate::api::extract::AppJson;
use crate::api::middleware::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Creates an account.
///
/// # Endpoint
///
/// `POST /users/register`
///
/// # Errors
///
/// Returns 400 Bad Request if a field is missing or the email is malformed.
/// Returns 409 Conflict if the username or email is already taken.
pub async fn register_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(&payload.username, &payload.email, &payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /users/login`
///
/// # Errors
///
/// Returns 400 Bad Request if a field is missing.
/// Returns 401 Unauthorized for an unknown email or wrong password, without
/// saying which.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let (token, user) = state
        .user_service
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse { token, user }))
}

/// `GET /users/profile`
pub async fn get_profile_handler(
    caller: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = state.user_service.get_profile(caller.user_id).await?;

    Ok(Json(ProfileResponse { user }))
}

/// Changes the caller's username and/or email.
///
/// # Endpoint
///
/// `PUT /users/profile`
///
/// # Errors
///
/// Returns 400 Bad Request if neither field carries a value, or a value is
/// malformed.
/// Returns 409 Conflict if the new value belongs to another account.
pub async fn update_profile_handler(
    caller: AuthenticatedUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    state
        .user_service
        .update_profile(
            caller.user_id,
            payload.username.as_deref(),
            payload.email.as_deref(),
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

/// Issues a fresh API key, replacing any previous one.
///
/// # Endpoint
///
/// `POST /users/api-key`
pub async fn generate_api_key_handler(
    caller: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<ApiKeyResponse>, AppError> {
    let api_key = state.user_service.generate_api_key(caller.user_id).await?;

    Ok(Json(ApiKeyResponse { api_key }))
}
