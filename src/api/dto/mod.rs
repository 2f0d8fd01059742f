//! Data Transfer Objects for API requests and responses.
//!
//! Every endpoint has a fixed request/response struct; no ad hoc JSON maps.

pub mod health;
pub mod link;
pub mod user;
