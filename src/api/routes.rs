//! API route configuration.
//!
//! Routes are stateless `Router<AppState>` fragments; layers that depend on
//! the transport (rate limiting, path normalization) are added in
//! [`crate::routes`].

use crate::api::handlers::{
    create_link_handler, generate_api_key_handler, get_link_handler, get_profile_handler,
    health_handler, login_handler, redirect_handler, register_handler, update_profile_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link and probe routes; none require authentication.
///
/// # Endpoints
///
/// - `GET  /health`       - Storage connectivity probe
/// - `POST /urls`         - Shorten a URL
/// - `GET  /urls/{code}`  - Inspect a short link
/// - `GET  /{code}`       - Redirect to the original URL
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/urls", post(create_link_handler))
        .route("/urls/{code}", get(get_link_handler))
        .route("/{code}", get(redirect_handler))
}

/// Credential exchange routes.
///
/// - `POST /users/register`
/// - `POST /users/login`
pub fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register_handler))
        .route("/users/login", post(login_handler))
}

/// Account routes, authenticated per handler by
/// [`crate::api::middleware::AuthenticatedUser`].
///
/// - `GET  /users/profile`
/// - `PUT  /users/profile`
/// - `POST /users/api-key`
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/profile",
            get(get_profile_handler).put(update_profile_handler),
        )
        .route("/users/api-key", post(generate_api_key_handler))
}

/// Every API route without transport-level layers.
///
/// Used directly by tests, which run without a socket peer address.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(link_routes())
        .merge(credential_routes())
        .merge(account_routes())
}
