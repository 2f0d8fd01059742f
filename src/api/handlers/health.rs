//! Handler for health check endpoint.

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};

use crate::api::dto::health::{HealthResponse, ServiceStatuses};
use crate::state::AppState;

/// Reports whether the service can reach its storage.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always answers `200 OK`; a storage failure only degrades the `status`
/// field.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2025-01-01T00:00:00Z",
///   "services": { "mongoDB": "connected" }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match state.link_service.ping().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: storage unreachable");
            false
        }
    };

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        services: ServiceStatuses {
            database: if connected { "connected" } else { "disconnected" }.to_string(),
        },
    })
}
