//! Handlers for creating and inspecting short links.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::link::{CreateLinkRequest, ShortLinkResponse};
use crate::api::extract::AppJson;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /urls`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created` with the stored link and its full `short_url`.
///
/// # Errors
///
/// Returns 400 Bad Request unless the URL starts with `http://` or `https://`.
pub async fn create_link_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<ShortLinkResponse>), AppError> {
    let resolved = state.link_service.create(&payload.original_url).await?;

    Ok((StatusCode::CREATED, Json(resolved.into())))
}

/// Returns a short link without redirecting.
///
/// # Endpoint
///
/// `GET /urls/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShortLinkResponse>, AppError> {
    let resolved = state.link_service.resolve(&code).await?;

    Ok(Json(resolved.into()))
}
