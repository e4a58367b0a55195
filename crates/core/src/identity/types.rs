//! Identity inputs and views.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::UserRecord;

/// New user details.
#[derive(Debug, Clone)]
pub struct Registration {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Unique username.
    pub username: String,
    /// Email in any case.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// How a user identifies at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentity {
    /// Exact username.
    Username(String),
    /// Email, matched case-insensitively.
    Email(String),
}

/// Profile fields to change. Empty strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New plaintext password.
    pub new_password: Option<String>,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    /// Username.
    pub username: String,
    /// Lower-cased email.
    pub email: String,
    /// First name.
    #[serde(rename = "first name")]
    pub first_name: String,
    /// Last name.
    #[serde(rename = "last name")]
    pub last_name: String,
    /// Registration time.
    #[serde(rename = "date created")]
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        Self {
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}
