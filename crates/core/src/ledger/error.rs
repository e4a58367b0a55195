//! Ledger error types.
//!
//! Every failure of a banking operation is one of these variants. Not-found
//! errors map to 404, business-rule violations to 402, and data corruption or
//! infrastructure failures to 500.

use bankline_shared::types::AccountId;
use thiserror::Error;

use crate::auth::PasswordError;
use crate::store::StoreError;

/// Errors that can occur during ledger, account, and identity operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Not Found ==========
    /// Acting user is missing or inactive.
    #[error("User not found")]
    UserNotFound,

    /// Account is missing, inactive, or not owned by the caller.
    #[error("Account not found")]
    AccountNotFound,

    /// Transfer receiver is missing or inactive.
    #[error("Receiver not found")]
    ReceiverNotFound,

    /// Receiver account is missing, inactive, or not owned by the receiver.
    #[error("Receiver account not found")]
    ReceiverAccountNotFound,

    // ========== Business Rules ==========
    /// Sender and receiver are the same account or the same user.
    #[error("Cannot transfer to self")]
    SelfTransfer,

    /// Sender and receiver accounts hold different currencies.
    #[error("Currency mismatch")]
    CurrencyMismatch,

    /// Balance is lower than the requested amount.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Credit would push a balance past what an account can hold.
    #[error("Balance limit exceeded")]
    BalanceLimitExceeded,

    /// Account still holds funds and cannot be deactivated.
    #[error("Please withdraw all funds before deleting account")]
    NonZeroBalance(AccountId),

    /// Password did not verify.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Username or email is already registered.
    #[error("Username or email already exists")]
    AlreadyExists,

    // ========== Data Corruption ==========
    /// A stored transaction carries an unknown type tag.
    #[error("Invalid transaction type: {0}")]
    InvalidTransactionType(String),

    // ========== Infrastructure ==========
    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::ReceiverNotFound => "RECEIVER_NOT_FOUND",
            Self::ReceiverAccountNotFound => "RECEIVER_ACCOUNT_NOT_FOUND",
            Self::SelfTransfer => "SELF_TRANSFER",
            Self::CurrencyMismatch => "CURRENCY_MISMATCH",
            Self::InsufficientFunds => "INSUFFICIENT_FUNDS",
            Self::BalanceLimitExceeded => "BALANCE_LIMIT_EXCEEDED",
            Self::NonZeroBalance(_) => "NON_ZERO_BALANCE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::InvalidTransactionType(_) => "INVALID_TRANSACTION_TYPE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            // 404 Not Found
            Self::UserNotFound
            | Self::AccountNotFound
            | Self::ReceiverNotFound
            | Self::ReceiverAccountNotFound => 404,

            // 402 - business rule violations
            Self::SelfTransfer
            | Self::CurrencyMismatch
            | Self::InsufficientFunds
            | Self::BalanceLimitExceeded
            | Self::NonZeroBalance(_)
            | Self::InvalidCredentials
            | Self::AlreadyExists => 402,

            // 500 Internal Server Error
            Self::InvalidTransactionType(_) | Self::Database(_) | Self::Internal(_) => 500,
        }
    }
}

impl From<StoreError> for LedgerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Backend(msg) => Self::Database(msg),
        }
    }
}

impl From<PasswordError> for LedgerError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(LedgerError::UserNotFound, 404, "USER_NOT_FOUND")]
    #[case(LedgerError::AccountNotFound, 404, "ACCOUNT_NOT_FOUND")]
    #[case(LedgerError::ReceiverNotFound, 404, "RECEIVER_NOT_FOUND")]
    #[case(LedgerError::ReceiverAccountNotFound, 404, "RECEIVER_ACCOUNT_NOT_FOUND")]
    #[case(LedgerError::SelfTransfer, 402, "SELF_TRANSFER")]
    #[case(LedgerError::CurrencyMismatch, 402, "CURRENCY_MISMATCH")]
    #[case(LedgerError::InsufficientFunds, 402, "INSUFFICIENT_FUNDS")]
    #[case(LedgerError::BalanceLimitExceeded, 402, "BALANCE_LIMIT_EXCEEDED")]
    #[case(LedgerError::NonZeroBalance(AccountId::new(1)), 402, "NON_ZERO_BALANCE")]
    #[case(LedgerError::InvalidCredentials, 402, "INVALID_CREDENTIALS")]
    #[case(LedgerError::AlreadyExists, 402, "ALREADY_EXISTS")]
    #[case(LedgerError::InvalidTransactionType("X".into()), 500, "INVALID_TRANSACTION_TYPE")]
    #[case(LedgerError::Database("x".into()), 500, "DATABASE_ERROR")]
    #[case(LedgerError::Internal("x".into()), 500, "INTERNAL_ERROR")]
    fn test_status_and_code(#[case] err: LedgerError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.http_status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(LedgerError::SelfTransfer.to_string(), "Cannot transfer to self");
        assert_eq!(
            LedgerError::ReceiverAccountNotFound.to_string(),
            "Receiver account not found"
        );
        assert_eq!(
            LedgerError::NonZeroBalance(AccountId::new(3)).to_string(),
            "Please withdraw all funds before deleting account"
        );
        assert_eq!(
            LedgerError::InvalidTransactionType("REFUND".into()).to_string(),
            "Invalid transaction type: REFUND"
        );
    }

    #[test]
    fn test_store_error_maps_to_database() {
        let err: LedgerError = StoreError::Backend("connection reset".into()).into();
        assert!(matches!(err, LedgerError::Database(msg) if msg == "connection reset"));
    }
}
