//! User identity: registration, authentication, profile, and deactivation.

mod service;
mod types;

pub use service::IdentityService;
pub use types::{LoginIdentity, ProfileUpdate, Registration, UserProfile};
