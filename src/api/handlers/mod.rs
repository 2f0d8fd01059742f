//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod links;
pub mod redirect;
pub mod users;

pub use health::health_handler;
pub use links::{create_link_handler, get_link_handler};
pub use redirect::redirect_handler;
pub use users::{
    generate_api_key_handler, get_profile_handler, login_handler, register_handler,
    update_profile_handler,
};
