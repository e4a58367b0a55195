//! Read views over accounts.

use bankline_shared::types::AccountId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::store::AccountRecord;

/// Balance of a single account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    /// Account id.
    pub id: AccountId,
    /// Current balance.
    pub balance: Decimal,
    /// Currency display name.
    pub currency: &'static str,
}

/// Listing entry for one of a user's accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// Account id.
    pub id: AccountId,
    /// Currency display name.
    pub currency: &'static str,
    /// Current balance.
    pub balance: Decimal,
    /// Creation time.
    #[serde(rename = "date created")]
    pub created_at: DateTime<Utc>,
}

impl From<&AccountRecord> for AccountBalance {
    fn from(account: &AccountRecord) -> Self {
        Self {
            id: account.id,
            balance: account.balance,
            currency: account.currency.name(),
        }
    }
}

impl From<&AccountRecord> for AccountSummary {
    fn from(account: &AccountRecord) -> Self {
        Self {
            id: account.id,
            currency: account.currency.name(),
            balance: account.balance,
            created_at: account.created_at,
        }
    }
}
