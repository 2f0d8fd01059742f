//! DTOs for short link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ResolvedLink;

/// Request body for `POST /urls`.
///
/// The URL scheme is checked by the link service, so a missing field reaches
/// it as an empty string and is rejected there.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub original_url: String,
}

/// A short link as returned to clients.
#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub short_url: String,
}

impl From<ResolvedLink> for ShortLinkResponse {
    fn from(resolved: ResolvedLink) -> Self {
        let ResolvedLink { link, short_url } = resolved;

        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            created_at: link.created_at,
            short_url,
        }
    }
}
