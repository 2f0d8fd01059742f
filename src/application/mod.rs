//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation and credential checks,
//! and expose a clean API to the HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link creation and resolution
//! - [`services::auth_service::AuthService`] - Password hashing and bearer tokens
//! - [`services::user_service::UserService`] - Registration, login, profiles and API keys

pub mod services;
