//! Authentication types for JWT and user payloads.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Kind of token carried in the claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token authorizing API calls.
    Access,
    /// Long-lived token exchanged for a new pair.
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
        }
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "access" => Ok(Self::Access),
            "refresh" => Ok(Self::Refresh),
            _ => Err(format!("Unknown token kind: {s}")),
        }
    }
}

/// JWT claims shared by access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username).
    pub sub: String,
    /// Unique token identifier, the key used for revocation.
    pub jti: Uuid,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Whether the token was issued directly from a credential check.
    pub fresh: bool,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user with a random token id.
    #[must_use]
    pub fn new(username: &str, kind: TokenKind, fresh: bool, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: username.to_string(),
            jti: Uuid::new_v4(),
            kind,
            fresh,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the username from claims.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.sub
    }
}

/// Token pair returned after register, login, and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token (short-lived).
    pub access: String,
    /// Refresh token (long-lived).
    pub refresh: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// First name.
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    /// Last name.
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    /// Unique username.
    #[validate(length(min = 1, max = 100, message = "Username must be 1-100 characters"))]
    pub username: String,
    /// Unique email (case-insensitive).
    #[validate(email(message = "Not a valid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// Must equal `password`.
    #[validate(must_match(other = "password", message = "Password and confirm password must match"))]
    pub confirm_password: String,
}

/// Login request payload. Exactly one of `username` or `email` is required.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "check_login_identity"))]
pub struct LoginRequest {
    /// Username.
    pub username: Option<String>,
    /// Email.
    #[validate(email(message = "Not a valid email address"))]
    pub email: Option<String>,
    /// Plaintext password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

fn check_login_identity(request: &LoginRequest) -> Result<(), ValidationError> {
    match (&request.username, &request.email) {
        (None, None) => Err(schema_error("Email or username is required")),
        (Some(_), Some(_)) => Err(schema_error("Email and username cannot be both provided")),
        _ => Ok(()),
    }
}

/// Profile update request. At least one field must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "check_update_fields"))]
pub struct UpdateUserRequest {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New password.
    pub new_password: Option<String>,
    /// Must equal `new_password`.
    pub confirm_new_password: Option<String>,
}

fn check_update_fields(request: &UpdateUserRequest) -> Result<(), ValidationError> {
    if request.first_name.is_none() && request.last_name.is_none() && request.new_password.is_none()
    {
        return Err(schema_error("At least one field must be updated"));
    }
    match (&request.new_password, &request.confirm_new_password) {
        (Some(_), None) => Err(schema_error("Confirm new password is required")),
        (None, Some(_)) => Err(schema_error("New password is required")),
        (Some(new), Some(confirm)) if new != confirm => Err(schema_error(
            "New password and confirm new password must match",
        )),
        _ => Ok(()),
    }
}

fn schema_error(message: &'static str) -> ValidationError {
    ValidationError::new("schema").with_message(Cow::Borrowed(message))
}
