//! Request middleware.

pub mod auth;

pub use auth::{AuthUser, require_access, require_refresh};
