//! Ledger engine for balance-affecting operations.
//!
//! This module implements the core ledger functionality:
//! - Deposit, withdraw, and transfer with ordered validation
//! - Domain types for transfer requests
//! - Error types shared by every banking operation

pub mod engine;
pub mod error;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::LedgerEngine;
pub use error::LedgerError;
pub use types::TransferRequest;
