//! In-process repositories.
//!
//! Used by `STORAGE_BACKEND=memory` and by the HTTP tests. Each operation
//! takes a single lock, so inserts and updates are atomic and enforce the
//! same unique constraints as the PostgreSQL schema.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewShortLink, NewUser, ProfileUpdate, ShortLink, User};
use crate::domain::repositories::{LinkRepository, UserRepository};
use crate::error::AppError;
use crate::utils::db_error::{
    EMAIL_CONSTRAINT, SHORT_CODE_CONSTRAINT, USERNAME_CONSTRAINT, describe_unique_violation,
};

fn unique_violation(constraint: &'static str) -> AppError {
    AppError::conflict(
        describe_unique_violation(Some(constraint)),
        json!({ "constraint": constraint }),
    )
}

#[derive(Default)]
struct LinkTable {
    next_id: i64,
    by_code: HashMap<String, ShortLink>,
}

/// Short links held in memory, keyed by code.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    table: RwLock<LinkTable>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let mut table = self.table.write().await;

        if table.by_code.contains_key(&new_link.short_code) {
            return Err(unique_violation(SHORT_CODE_CONSTRAINT));
        }

        table.next_id += 1;
        let link = ShortLink::new(
            table.next_id,
            new_link.original_url,
            new_link.short_code,
            Utc::now(),
        );
        table.by_code.insert(link.short_code.clone(), link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        Ok(self.table.read().await.by_code.get(code).cloned())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.table.read().await.by_code.len() as i64)
    }
}

#[derive(Default)]
struct UserTable {
    next_id: i64,
    by_id: HashMap<i64, User>,
}

impl UserTable {
    /// Returns the constraint `username`/`email` would violate for a row other than `except`.
    fn violated_constraint(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        except: Option<i64>,
    ) -> Option<&'static str> {
        let others = move || self.by_id.values().filter(move |u| Some(u.id) != except);

        if let Some(email) = email
            && others().any(|u| u.email == email)
        {
            return Some(EMAIL_CONSTRAINT);
        }

        if let Some(username) = username
            && others().any(|u| u.username == username)
        {
            return Some(USERNAME_CONSTRAINT);
        }

        None
    }
}

/// User accounts held in memory, keyed by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut table = self.table.write().await;

        if let Some(constraint) =
            table.violated_constraint(Some(&new_user.username), Some(&new_user.email), None)
        {
            return Err(unique_violation(constraint));
        }

        table.next_id += 1;
        let user = User::new(
            table.next_id,
            new_user.username,
            new_user.email,
            new_user.password_hash,
            None,
            Utc::now(),
        );
        table.by_id.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.table.read().await.by_id.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table.by_id.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let table = self.table.read().await;
        Ok(table.by_id.values().find(|u| u.username == username).cloned())
    }

    async fn update_profile(&self, id: i64, update: ProfileUpdate) -> Result<bool, AppError> {
        let mut table = self.table.write().await;

        if !table.by_id.contains_key(&id) {
            return Ok(false);
        }

        if let Some(constraint) = table.violated_constraint(
            update.username.as_deref(),
            update.email.as_deref(),
            Some(id),
        ) {
            return Err(unique_violation(constraint));
        }

        if let Some(user) = table.by_id.get_mut(&id) {
            if let Some(username) = update.username {
                user.username = username;
            }
            if let Some(email) = update.email {
                user.email = email;
            }
        }

        Ok(true)
    }

    async fn set_api_key(&self, id: i64, api_key: &str) -> Result<bool, AppError> {
        let mut table = self.table.write().await;

        match table.by_id.get_mut(&id) {
            Some(user) => {
                user.api_key = Some(api_key.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.table.read().await.by_id.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_link_create_and_find() {
        let repo = InMemoryLinkRepository::new();

        let created = repo
            .create(NewShortLink {
                original_url: "https://example.com".to_string(),
                short_code: "abc123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(repo.find_by_code("abc123").await.unwrap(), Some(created));
        assert_eq!(repo.find_by_code("ABC123").await.unwrap(), None);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_link_duplicate_code_conflict() {
        let repo = InMemoryLinkRepository::new();
        let link = NewShortLink {
            original_url: "https://example.com".to_string(),
            short_code: "dup000".to_string(),
        };

        repo.create(link.clone()).await.unwrap();
        let result = repo.create(link).await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_user_unique_constraints() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice", "a@x.com")).await.unwrap();

        let same_email = repo.create(new_user("bob", "a@x.com")).await;
        let same_username = repo.create(new_user("alice", "b@x.com")).await;

        assert!(matches!(same_email, Err(AppError::Conflict { .. })));
        assert!(matches!(same_username, Err(AppError::Conflict { .. })));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_user_merge_update() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("alice", "a@x.com")).await.unwrap();

        let updated = repo
            .update_profile(
                user.id,
                ProfileUpdate {
                    username: None,
                    email: Some("new@x.com".to_string()),
                },
            )
            .await
            .unwrap();
        assert!(updated);

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.username, "alice");
        assert_eq!(stored.email, "new@x.com");
    }

    #[tokio::test]
    async fn test_user_update_to_taken_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice", "a@x.com")).await.unwrap();
        let bob = repo.create(new_user("bob", "b@x.com")).await.unwrap();

        let result = repo
            .update_profile(
                bob.id,
                ProfileUpdate {
                    username: None,
                    email: Some("a@x.com".to_string()),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_user_update_keeping_own_email_is_allowed() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.create(new_user("alice", "a@x.com")).await.unwrap();

        let result = repo
            .update_profile(
                alice.id,
                ProfileUpdate {
                    username: Some("alice2".to_string()),
                    email: Some("a@x.com".to_string()),
                },
            )
            .await;

        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn test_set_api_key_replaces_and_reports_missing() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("alice", "a@x.com")).await.unwrap();

        assert!(repo.set_api_key(user.id, "first").await.unwrap());
        assert!(repo.set_api_key(user.id, "second").await.unwrap());
        assert!(!repo.set_api_key(999, "x").await.unwrap());

        let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.api_key.as_deref(), Some("second"));
    }
}
