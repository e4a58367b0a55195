//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Request extractors
//! - Error responses

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use axum::Router;
use bankline_core::auth::{Argon2Hasher, CredentialHasher};
use bankline_shared::config::JwtConfig;
use bankline_shared::{JwtService, TokenKind};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Password hasher for registration, login, and password changes.
    pub hasher: Arc<dyn CredentialHasher>,
    /// Token kinds checked against the blocklist.
    pub revocation_checks: Arc<[TokenKind]>,
}

impl AppState {
    /// Builds the state with the Argon2 hasher.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt: &JwtConfig) -> Self {
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(JwtService::new(jwt.into())),
            hasher: Arc::new(Argon2Hasher),
            revocation_checks: jwt.checked_kinds().into(),
        }
    }

    /// Returns true if tokens of `kind` must be checked against the blocklist.
    #[must_use]
    pub fn checks_revocation(&self, kind: TokenKind) -> bool {
        self.revocation_checks.contains(&kind)
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
