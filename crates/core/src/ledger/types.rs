//! Domain types for ledger operations.

use bankline_shared::types::{AccountId, Amount};

/// Input for a transfer between two users.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Account debited, owned by the acting user.
    pub sender_account_id: AccountId,
    /// Username owning the credited account.
    pub receiver_username: String,
    /// Account credited.
    pub receiver_account_id: AccountId,
    /// Amount moved.
    pub amount: Amount,
}

impl TransferRequest {
    /// Returns true if the transfer targets the sender's own account or user.
    ///
    /// Compares identifiers only, without any lookup.
    #[must_use]
    pub fn is_self_transfer(&self, acting_username: &str) -> bool {
        self.sender_account_id == self.receiver_account_id
            || self.receiver_username == acting_username
    }

    /// Both account ids in ascending order, the order rows are locked in.
    #[must_use]
    pub fn lock_order(&self) -> [AccountId; 2] {
        if self.sender_account_id <= self.receiver_account_id {
            [self.sender_account_id, self.receiver_account_id]
        } else {
            [self.receiver_account_id, self.sender_account_id]
        }
    }
}
