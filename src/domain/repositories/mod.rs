//! Repository trait definitions for the domain layer.
//!
//! These traits abstract storage behind narrow
//! insert / find / update-by-filter operations. Concrete implementations live
//! in `crate::infrastructure::persistence`; mocks are generated with `mockall`
//! for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link storage
//! - [`UserRepository`] - User accounts and API keys

pub mod link_repository;
pub mod user_repository;

pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
