//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShortLink`] - A short code mapped to an original URL
//! - [`User`] - A registered account with credentials
//!
//! Creation inputs live in separate structs (`NewShortLink`, `NewUser`) since
//! the store assigns ids and timestamps. [`PublicUser`] is the only user shape
//! that leaves the service.

pub mod short_link;
pub mod user;

pub use short_link::{NewShortLink, ResolvedLink, ShortLink};
pub use user::{NewUser, ProfileUpdate, PublicUser, User};
