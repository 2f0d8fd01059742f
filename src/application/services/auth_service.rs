//! Credential service: password hashing and bearer token issuance/validation.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::domain::entities::User;
use crate::error::AppError;
use crate::utils::password;

/// Lifetime of an issued bearer token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claims embedded in a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string.
    pub sub: String,
    pub username: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Internal reason a credential check failed.
///
/// Logged for operators, never shown to clients: they only ever see
/// [`AppError::invalid_credentials`] or a generic `Unauthorized`.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no account with this email")]
    UnknownEmail,
    #[error("password does not match")]
    PasswordMismatch,
    #[error("token rejected: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("token subject is not a user id: {0}")]
    BadSubject(String),
}

/// Service for password hashing and stateless bearer tokens.
///
/// Tokens are HS256 JWTs signed with a process-held secret. There is no
/// server-side session table, so a token stays valid until it expires.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthService {
    /// Creates a credential service signing tokens with `secret`.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Hashes a plaintext password on the blocking thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the hasher fails.
    pub async fn hash_password(&self, plaintext: &str) -> Result<String, AppError> {
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
            .await
            .map_err(|e| {
                AppError::internal(
                    "Password hashing task failed",
                    json!({ "reason": e.to_string() }),
                )
            })?
            .map_err(|e| AppError::internal("Password hashing failed", json!({ "reason": e })))
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `false` for a mismatch or a malformed hash.
    pub async fn verify_password(&self, hash: &str, plaintext: &str) -> bool {
        let hash = hash.to_owned();
        let plaintext = plaintext.to_owned();

        tokio::task::spawn_blocking(move || password::verify_password(&hash, &plaintext))
            .await
            .unwrap_or(false)
    }

    /// Issues a token for `user`, valid for [`TOKEN_TTL_HOURS`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if encoding fails.
    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                AppError::internal("Failed to issue token", json!({ "reason": e.to_string() }))
            })
    }

    /// Decodes and checks a token, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Token`] if the signature is invalid, the
    /// algorithm is not HS256, or the token has expired.
    pub fn decode_token(&self, token: &str) -> Result<Claims, CredentialError> {
        Ok(decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims)
    }

    /// Validates a token and returns the user id it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with a generic message on any failure.
    pub fn validate_token(&self, token: &str) -> Result<i64, AppError> {
        let subject = self.decode_token(token).and_then(|claims| {
            claims
                .sub
                .parse::<i64>()
                .map_err(|_| CredentialError::BadSubject(claims.sub))
        });

        subject.map_err(|reason| {
            tracing::debug!(%reason, "Bearer token rejected");
            AppError::unauthorized("Unauthorized", json!({ "reason": "Invalid or expired token" }))
        })
    }
}
