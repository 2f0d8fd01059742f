//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: String,
    /// RFC 3339 UTC timestamp of the check.
    pub timestamp: String,
    pub services: ServiceStatuses,
}

/// Connectivity of each downstream dependency.
#[derive(Debug, Serialize)]
pub struct ServiceStatuses {
    /// `connected` or `disconnected`. Serialized under the `mongoDB` key
    /// that existing health clients read, whatever the backend.
    #[serde(rename = "mongoDB")]
    pub database: String,
}
