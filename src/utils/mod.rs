//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random short codes and API keys
//! - [`password`] - Argon2id password hashing
//! - [`db_error`] - Storage constraint violation messages

pub mod code_generator;
pub mod db_error;
pub mod password;
