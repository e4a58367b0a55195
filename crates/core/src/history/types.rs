//! Projected history entries.

use bankline_shared::types::AccountId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// One line of an account's transaction history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HistoryEntry {
    /// Funds moved between two users.
    Transfer {
        /// Amount moved.
        amount: Decimal,
        /// Time of the transfer.
        #[serde(rename = "transaction date")]
        date: DateTime<Utc>,
        /// Username owning the debited account.
        sender: String,
        /// Debited account.
        #[serde(rename = "sender account id")]
        sender_account_id: AccountId,
        /// Username owning the credited account.
        receiver: String,
        /// Credited account.
        #[serde(rename = "receiver account id")]
        receiver_account_id: AccountId,
    },
    /// Funds added to an account.
    Deposit {
        /// Amount added.
        amount: Decimal,
        /// Time of the deposit.
        #[serde(rename = "transaction date")]
        date: DateTime<Utc>,
        /// Affected account.
        #[serde(rename = "account id")]
        account_id: AccountId,
    },
    /// Funds removed from an account.
    Withdraw {
        /// Amount removed.
        amount: Decimal,
        /// Time of the withdrawal.
        #[serde(rename = "transaction date")]
        date: DateTime<Utc>,
        /// Affected account.
        #[serde(rename = "account id")]
        account_id: AccountId,
    },
}

impl HistoryEntry {
    /// Time the entry happened.
    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Self::Transfer { date, .. } | Self::Deposit { date, .. } | Self::Withdraw { date, .. } => {
                *date
            }
        }
    }

    /// Amount of the entry.
    #[must_use]
    pub fn amount(&self) -> Decimal {
        match self {
            Self::Transfer { amount, .. }
            | Self::Deposit { amount, .. }
            | Self::Withdraw { amount, .. } => *amount,
        }
    }
}
