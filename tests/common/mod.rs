#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use linkvault::api::routes::api_router;
use linkvault::domain::entities::{NewShortLink, ShortLink};
use linkvault::domain::repositories::{LinkRepository, UserRepository};
use linkvault::error::AppError;
use linkvault::infrastructure::persistence::{InMemoryLinkRepository, InMemoryUserRepository};
use linkvault::state::AppState;
use linkvault::utils::code_generator::CodeGenerator;
use serde_json::{Value, json};
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const TEST_HOST: &str = "http://sho.rt/";

pub fn create_test_state() -> AppState {
    state_with(
        Arc::new(InMemoryLinkRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
    )
}

pub fn state_with(
    links: Arc<dyn LinkRepository>,
    users: Arc<dyn UserRepository>,
) -> AppState {
    AppState::new(
        links,
        users,
        Arc::new(CodeGenerator::seeded(42)),
        TEST_HOST.to_string(),
        TEST_SECRET,
    )
}

pub fn test_app(state: AppState) -> Router {
    api_router().with_state(state)
}

pub fn test_server() -> TestServer {
    TestServer::new(test_app(create_test_state())).unwrap()
}

/// Registers `username` with email `<username>@example.com` and password `pw-<username>`.
pub async fn register(server: &TestServer, username: &str) -> Value {
    let response = server
        .post("/users/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": format!("pw-{username}"),
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Registers and logs in, returning the bearer token.
pub async fn register_and_login(server: &TestServer, username: &str) -> String {
    register(server, username).await;

    let response = server
        .post("/users/login")
        .json(&json!({
            "email": format!("{username}@example.com"),
            "password": format!("pw-{username}"),
        }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Link store whose every call fails, as an unreachable database would.
pub struct UnreachableLinkRepository;

#[async_trait]
impl LinkRepository for UnreachableLinkRepository {
    async fn create(&self, _new_link: NewShortLink) -> Result<ShortLink, AppError> {
        Err(unreachable_store())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<ShortLink>, AppError> {
        Err(unreachable_store())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(unreachable_store())
    }
}

fn unreachable_store() -> AppError {
    AppError::storage(
        "Database error",
        json!({ "reason": "connection refused" }),
    )
}
