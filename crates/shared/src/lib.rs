//! Shared types, errors, and configuration for Bankline.
//!
//! This crate provides common types used across all other crates:
//! - Money, currency, and amount types with decimal precision
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - JWT claims, token issuing, and request payloads
//! - Account and transaction request payloads
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod requests;
pub mod types;

pub use auth::{Claims, TokenKind, TokenPair};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
