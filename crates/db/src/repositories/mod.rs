//! Store implementations for data access.
//!
//! The domain services run against the traits in `bankline_core::store`.
//! `UnitOfWork` implements all of them over one database transaction, so
//! every read and write of an operation commits or rolls back together.

pub mod account;
pub mod token_blocklist;
pub mod transaction;
pub mod unit_of_work;
pub mod user;

pub use token_blocklist::TokenBlocklistRepository;
pub use unit_of_work::{UnitOfWork, UnitOfWorkExt};

use bankline_core::store::StoreError;
use sea_orm::DbErr;

fn backend(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}
