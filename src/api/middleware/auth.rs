//! Bearer token authentication.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// The user a request was authenticated as.
///
/// Handlers that need authentication take this as an argument; the subject id
/// from the validated token is handed to them directly.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Rejects with `401 Unauthorized` (plus `WWW-Authenticate: Bearer`) if the
/// header is missing or malformed, or the token fails validation.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile_handler(user: AuthenticatedUser, State(st): State<AppState>) { /* ... */ }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, st: &AppState) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
            .await
            .map_err(|_| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({"reason": "Authorization header is missing or invalid"}),
                )
            })?;

        let user_id = st.auth_service.validate_token(&token)?;

        Ok(Self { user_id })
    }
}
