//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bankline_db::TokenBlocklistRepository;
use bankline_shared::{Claims, JwtError, TokenKind};
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Admits requests carrying a valid, unrevoked access token.
pub async fn require_access(State(state): State<AppState>, request: Request, next: Next) -> Response {
    authenticate(&state, request, next, TokenKind::Access).await
}

/// Admits requests carrying a valid, unrevoked refresh token.
pub async fn require_refresh(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    authenticate(&state, request, next, TokenKind::Refresh).await
}

/// Validates the bearer token and stores its claims in request extensions.
///
/// Rejects with 401 when the token is missing, malformed, expired, of the
/// wrong kind, or on the blocklist.
async fn authenticate(
    state: &AppState,
    mut request: Request,
    next: Next,
    expected: TokenKind,
) -> Response {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return ApiError::unauthorized("Authorization header with Bearer token is required")
            .into_response();
    };

    let claims = match state.jwt_service.validate_kind(token, expected) {
        Ok(claims) => claims,
        Err(JwtError::Expired) => {
            return ApiError::unauthorized("Token has expired").into_response();
        }
        Err(JwtError::WrongKind { expected }) => {
            return ApiError::unauthorized(format!("Only {expected} tokens are allowed"))
                .into_response();
        }
        Err(_) => {
            return ApiError::unauthorized("Invalid or malformed token").into_response();
        }
    };

    if state.checks_revocation(claims.kind) {
        let blocklist = TokenBlocklistRepository::new((*state.db).clone());
        match blocklist.is_revoked(claims.jti).await {
            Ok(false) => {}
            Ok(true) => {
                info!(username = %claims.sub, kind = %claims.kind, "Rejected revoked token");
                return ApiError::unauthorized("Token has been revoked").into_response();
            }
            Err(e) => {
                error!(error = %e, "Failed to check token blocklist");
                return ApiError::from(e).into_response();
            }
        }
    }

    request.extensions_mut().insert(claims);
    next.run(request).await
}

/// Extractor for authenticated user claims.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let username = auth.username();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the username from the claims.
    #[must_use]
    pub fn username(&self) -> &str {
        self.0.username()
    }

    /// Returns the token id, the key used for revocation.
    #[must_use]
    pub fn jti(&self) -> Uuid {
        self.0.jti
    }

    /// Returns the inner claims.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
