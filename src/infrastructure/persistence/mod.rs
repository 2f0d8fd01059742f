//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] / [`PgUserRepository`] - PostgreSQL storage via SQLx
//! - [`InMemoryLinkRepository`] / [`InMemoryUserRepository`] - In-process storage
//!   for development and tests

pub mod memory;
pub mod pg_link_repository;
pub mod pg_user_repository;

pub use memory::{InMemoryLinkRepository, InMemoryUserRepository};
pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
