//! Error responses.
//!
//! Every failure is answered as `{"error": <message>, "code": <code>}`.
//! `NonZeroBalance` also carries the blocking `"account id"`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bankline_core::LedgerError;
use bankline_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Error returned by handlers and extractors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain failure from a core service.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Request or authentication failure.
    #[error(transparent)]
    App(#[from] AppError),
}

impl ApiError {
    /// Shorthand for a 401 validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::App(AppError::Validation(message.into()))
    }

    /// Shorthand for a 401 authentication failure.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::App(AppError::Unauthorized(message.into()))
    }

    fn status(&self) -> StatusCode {
        let code = match self {
            Self::Ledger(e) => e.http_status_code(),
            Self::App(e) => e.status_code(),
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Ledger(e) => e.error_code(),
            Self::App(e) => e.error_code(),
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self::Ledger(LedgerError::Database(err.to_string()))
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self::App(AppError::Internal(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = if status.is_server_error() {
            error!(error = %self, code, "Request failed");
            "An internal error occurred".to_string()
        } else {
            warn!(error = %self, code, "Request rejected");
            match &self {
                Self::Ledger(e) => e.to_string(),
                Self::App(e) => e.message().to_string(),
            }
        };

        let mut body = json!({ "error": message, "code": code });
        if let Self::Ledger(LedgerError::NonZeroBalance(account_id)) = &self {
            body["account id"] = json!(account_id);
        }

        (status, Json(body)).into_response()
    }
}
