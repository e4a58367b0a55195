//! Currency accounts owned by users.
//!
//! Accounts are created with a zero balance in a fixed currency, resolved only
//! when active and owned by the caller, and soft-deactivated once empty.

mod service;
mod types;

pub use service::AccountService;
pub use types::{AccountBalance, AccountSummary};
