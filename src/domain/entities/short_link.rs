//! Short link entity mapping a short code to its original URL.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// Immutable once stored. The externally addressable short URL is not part of
/// the record; it is derived from the current host configuration on every read
/// (see [`crate::application::services::LinkService::short_url`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Creates a new ShortLink instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
        }
    }
}

/// Input data for inserting a short link. The store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
}

/// A short link together with its short URL for the current host.
#[derive(Debug, Clone)]
pub struct ResolvedLink {
    pub link: ShortLink,
    pub short_url: String,
}
