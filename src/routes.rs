//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                 - Storage probe (public)
//! - `POST /urls`, `GET /urls/{code}` - Link management (public)
//! - `GET  /{code}`                 - Short link redirect (public)
//! - `POST /users/register|login`   - Credential exchange (rate limited)
//! - `/users/profile`, `/users/api-key` - Bearer token required
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on credential endpoints
//! - **Path normalization** - Trailing slash handling

use crate::api::middleware::{rate_limit, tracing};
use crate::api::routes::{account_routes, credential_routes, link_routes};
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// The rate limiter keys on the peer socket address, so the router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let credentials = credential_routes().layer(rate_limit::credentials_layer());

    let router = Router::new()
        .merge(link_routes())
        .merge(credentials)
        .merge(account_routes())
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
