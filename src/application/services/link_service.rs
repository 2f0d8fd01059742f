//! Short link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ResolvedLink, ShortLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use serde_json::json;

/// Service for creating and resolving short links.
///
/// Codes are random and a storage-level collision on insert surfaces as
/// [`AppError::Conflict`]; there is no retry with a fresh code.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    generator: Arc<CodeGenerator>,
    short_url_host: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `repository` - link storage
    /// - `generator` - source of short codes
    /// - `short_url_host` - public prefix short URLs are built from,
    ///   e.g. `http://localhost:3000/`
    pub fn new(repository: Arc<L>, generator: Arc<CodeGenerator>, short_url_host: String) -> Self {
        Self {
            repository,
            generator,
            short_url_host,
        }
    }

    /// Shortens `original_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] unless the URL starts with `http://` or
    /// `https://`; nothing is persisted in that case.
    /// Returns [`AppError::Conflict`] if the generated code already exists.
    /// Returns [`AppError::Storage`] if the insert fails.
    pub async fn create(&self, original_url: &str) -> Result<ResolvedLink, AppError> {
        if !original_url.starts_with("http://") && !original_url.starts_with("https://") {
            return Err(AppError::bad_request(
                "Invalid URL",
                json!({ "reason": "URL must start with http:// or https://" }),
            ));
        }

        let new_link = NewShortLink {
            original_url: original_url.to_string(),
            short_code: self.generator.short_code(),
        };

        let link = self.repository.create(new_link).await?;
        tracing::info!(code = %link.short_code, id = link.id, "Short link created");

        Ok(self.with_short_url(link))
    }

    /// Looks up a link by exact short code.
    ///
    /// The short URL is rebuilt from the host configured now, not the one in
    /// effect when the link was created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Storage`] on storage errors.
    pub async fn resolve(&self, code: &str) -> Result<ResolvedLink, AppError> {
        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        Ok(self.with_short_url(link))
    }

    /// Builds the externally addressable URL for `code` by appending it to
    /// the configured host verbatim.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}{}", self.short_url_host, code)
    }

    /// Round-trips to storage, returning the number of stored links.
    pub async fn ping(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    fn with_short_url(&self, link: ShortLink) -> ResolvedLink {
        let short_url = self.short_url(&link.short_code);
        ResolvedLink { link, short_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    const HOST: &str = "http://localhost:8000/";

    fn stored(new_link: NewShortLink) -> ShortLink {
        ShortLink::new(1, new_link.original_url, new_link.short_code, Utc::now())
    }

    fn service(mock: MockLinkRepository, host: &str) -> LinkService<MockLinkRepository> {
        LinkService::new(
            Arc::new(mock),
            Arc::new(CodeGenerator::seeded(3)),
            host.to_string(),
        )
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .withf(|l| l.original_url == "https://example.com/test" && l.short_code.len() == 6)
            .times(1)
            .returning(|l| Ok(stored(l)));

        let result = service(mock_repo, HOST)
            .create("https://example.com/test")
            .await
            .unwrap();

        assert_eq!(result.link.original_url, "https://example.com/test");
        assert_eq!(result.link.short_code.len(), 6);
        assert!(result.short_url.starts_with(HOST));
        assert!(result.short_url.ends_with(&result.link.short_code));
    }

    #[tokio::test]
    async fn test_create_accepts_plain_http() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|l| Ok(stored(l)));

        assert!(service(mock_repo, HOST).create("http://example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_invalid_url_skips_storage() {
        for input in ["example.com", "ftp://example.com", "", "HTTP//x", " https://x.com"] {
            let mut mock_repo = MockLinkRepository::new();
            mock_repo.expect_create().times(0);

            let result = service(mock_repo, HOST).create(input).await;

            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_create_collision_is_conflict() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Short code already exists", json!({}))));

        let result = service(mock_repo, HOST).create("https://example.com").await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_create_storage_error_propagates() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::storage("Database error", json!({ "reason": "down" }))));

        let result = service(mock_repo, HOST).create("https://example.com").await;

        assert!(matches!(result, Err(AppError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "nope00")
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo, HOST).resolve("nope00").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_uses_current_host() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(ShortLink::new(
                9,
                "https://example.com".to_string(),
                code.to_string(),
                Utc::now(),
            )))
        });

        let result = service(mock_repo, "https://sho.rt/")
            .resolve("abc123")
            .await
            .unwrap();

        assert_eq!(result.short_url, "https://sho.rt/abc123");
        assert_eq!(result.link.original_url, "https://example.com");
    }

    #[test]
    fn test_short_url_is_host_followed_by_code() {
        let root = service(MockLinkRepository::new(), "http://h/");
        let prefixed = service(MockLinkRepository::new(), "https://x.com/s/");

        assert_eq!(root.short_url("abc"), "http://h/abc");
        assert_eq!(prefixed.short_url("abc"), "https://x.com/s/abc");
    }
}
