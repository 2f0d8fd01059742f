//! Repository trait for user account data access.

use crate::domain::entities::{NewUser, ProfileUpdate, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the `users` collection.
///
/// Implementations enforce uniqueness of `email` and `username` at the storage
/// boundary and report violations as [`AppError::Conflict`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUserRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryUserRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user, assigning its id and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username is taken.
    /// Returns [`AppError::Storage`] on storage errors.
    async fn create(&self, new_user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Applies a merge update to the user's profile fields.
    ///
    /// Returns `Ok(false)` if no user has the given id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new email or username belongs to
    /// another user.
    async fn update_profile(&self, id: i64, update: ProfileUpdate) -> Result<bool, AppError>;

    /// Replaces the user's API key.
    ///
    /// Returns `Ok(false)` if no user has the given id.
    async fn set_api_key(&self, id: i64, api_key: &str) -> Result<bool, AppError>;

    /// Counts registered users.
    async fn count(&self) -> Result<i64, AppError>;
}
