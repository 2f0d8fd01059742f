//! User registration, login, profile and API key service.

use std::sync::Arc;

use crate::application::services::auth_service::{AuthService, CredentialError};
use crate::domain::entities::{NewUser, ProfileUpdate, PublicUser};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use serde_json::json;

/// Service for user accounts.
///
/// Every user it returns is a [`PublicUser`], so password hashes never leave
/// this layer. Mutations are authorized upstream: callers pass the user id
/// obtained from [`AuthService::validate_token`].
///
/// # Uniqueness
///
/// `register` looks up email and username before inserting. Two concurrent
/// registrations can both pass that check; the storage unique constraints
/// catch the second insert and it fails with [`AppError::Conflict`].
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    auth: Arc<AuthService>,
    generator: Arc<CodeGenerator>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>, auth: Arc<AuthService>, generator: Arc<CodeGenerator>) -> Self {
        Self {
            repository,
            auth,
            generator,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email or username is already
    /// registered. The message does not say which.
    /// Returns [`AppError::Storage`] on storage errors.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, AppError> {
        if self.repository.find_by_email(email).await?.is_some() {
            tracing::info!("Registration rejected: email already registered");
            return Err(Self::identity_taken());
        }

        if self.repository.find_by_username(username).await?.is_some() {
            tracing::info!(username, "Registration rejected: username already taken");
            return Err(Self::identity_taken());
        }

        let password_hash = self.auth.hash_password(password).await?;

        let user = self
            .repository
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User registered");

        Ok(user.into())
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::invalid_credentials`] for an unknown email or a wrong
    /// password alike.
    /// Returns [`AppError::Storage`] on storage errors.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(String, PublicUser), AppError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::warn!(reason = %CredentialError::UnknownEmail, "Login failed");
            return Err(AppError::invalid_credentials());
        };

        if !self.auth.verify_password(&user.password_hash, password).await {
            tracing::warn!(
                user_id = user.id,
                reason = %CredentialError::PasswordMismatch,
                "Login failed"
            );
            return Err(AppError::invalid_credentials());
        }

        let token = self.auth.issue_token(&user)?;
        tracing::info!(user_id = user.id, "User logged in");

        Ok((token, user.into()))
    }

    /// Fetches a user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn get_profile(&self, user_id: i64) -> Result<PublicUser, AppError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .map(PublicUser::from)
            .ok_or_else(|| Self::user_not_found(user_id))
    }

    /// Updates whichever of `username` / `email` is non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if both are empty; storage is not touched.
    /// Returns [`AppError::NotFound`] if the user does not exist.
    /// Returns [`AppError::Conflict`] if a new value belongs to another user.
    pub async fn update_profile(
        &self,
        user_id: i64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<(), AppError> {
        let update = ProfileUpdate::from_inputs(username, email);

        if update.is_empty() {
            return Err(AppError::bad_request(
                "At least one field (username or email) is required",
                json!({}),
            ));
        }

        if !self.repository.update_profile(user_id, update).await? {
            return Err(Self::user_not_found(user_id));
        }

        tracing::info!(user_id, "Profile updated");
        Ok(())
    }

    /// Generates a new API key, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    pub async fn generate_api_key(&self, user_id: i64) -> Result<String, AppError> {
        let api_key = self.generator.api_key();

        if !self.repository.set_api_key(user_id, &api_key).await? {
            return Err(Self::user_not_found(user_id));
        }

        tracing::info!(user_id, "API key rotated");
        Ok(api_key)
    }

    fn identity_taken() -> AppError {
        AppError::conflict("Username or email already registered", json!({}))
    }

    fn user_not_found(user_id: i64) -> AppError {
        AppError::not_found("User not found", json!({ "user_id": user_id }))
    }
}
