//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkService, UserService};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::utils::code_generator::CodeGenerator;

/// Services shared across request tasks.
///
/// Services are built over trait objects so the same router serves both the
/// PostgreSQL and the in-memory backend.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub user_service: Arc<UserService<dyn UserRepository>>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires services on top of the given repositories.
    ///
    /// Links and API keys draw from one shared [`CodeGenerator`].
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        user_repository: Arc<dyn UserRepository>,
        generator: Arc<CodeGenerator>,
        short_url_host: String,
        jwt_secret: &str,
    ) -> Self {
        let auth_service = Arc::new(AuthService::new(jwt_secret));

        let link_service = Arc::new(LinkService::new(
            link_repository,
            generator.clone(),
            short_url_host,
        ));
        let user_service = Arc::new(UserService::new(
            user_repository,
            auth_service.clone(),
            generator,
        ));

        Self {
            link_service,
            user_service,
            auth_service,
        }
    }
}
