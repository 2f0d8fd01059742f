//! Interpretation of storage-level constraint violations.

/// Unique constraint on `urls.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "urls_short_code_key";
/// Unique constraint on `users.email`.
pub const EMAIL_CONSTRAINT: &str = "users_email_key";
/// Unique constraint on `users.username`.
pub const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Client-facing message for a unique violation on the named constraint.
///
/// Identity constraints share one message so a conflict does not reveal
/// whether the email or the username is already registered.
pub fn describe_unique_violation(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(SHORT_CODE_CONSTRAINT) => "Short code already exists",
        Some(EMAIL_CONSTRAINT) | Some(USERNAME_CONSTRAINT) => {
            "Username or email already registered"
        }
        _ => "Unique constraint violation",
    }
}
