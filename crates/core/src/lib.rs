//! Core business logic for Bankline.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Storage is reached through the traits in `store`, implemented by the
//! database crate.
//!
//! # Modules
//!
//! - `ledger` - Deposit, withdraw, and transfer with balance invariants
//! - `accounts` - Currency account lifecycle
//! - `history` - Transaction history reconstruction
//! - `identity` - Registration, login, profile, and deactivation
//! - `auth` - Credential hashing
//! - `store` - Storage interfaces

pub mod accounts;
pub mod auth;
pub mod history;
pub mod identity;
pub mod ledger;
pub mod store;

pub use ledger::LedgerError;
