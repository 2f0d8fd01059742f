//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Answers `307 Temporary Redirect` so clients keep asking the service and a
/// link can still be observed on every hit.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let resolved = state.link_service.resolve(&code).await?;
    tracing::debug!(code = %code, "Redirecting");

    Ok(Redirect::temporary(&resolved.link.original_url))
}
