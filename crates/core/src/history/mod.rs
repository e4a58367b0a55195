//! Transaction history reconstruction.
//!
//! Merges the records an account sent and received into one de-duplicated,
//! newest-first view, projected by transaction type.

mod service;
mod types;

pub use service::HistoryService;
pub use types::HistoryEntry;
