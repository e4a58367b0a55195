//! Money, currency and amount types with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! These types wrap `rust_decimal::Decimal` for arbitrary precision.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO 4217 currencies supported by the system.
///
/// The discriminant is the ISO numeric code, which is what gets persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(i32)]
pub enum Currency {
    /// Lebanese Pound
    Lbp = 422,
    /// US Dollar
    Usd = 840,
}

/// Numeric code to display-name table, built once.
static CURRENCY_NAMES: Lazy<HashMap<i32, &'static str>> = Lazy::new(|| {
    HashMap::from([(Currency::Lbp.code(), "LBP"), (Currency::Usd.code(), "USD")])
});

impl Currency {
    /// Every supported currency.
    pub const ALL: [Self; 2] = [Self::Lbp, Self::Usd];

    /// Returns the ISO 4217 numeric code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Returns the ISO 4217 alphabetic code shown to clients.
    #[must_use]
    pub fn name(self) -> &'static str {
        CURRENCY_NAMES.get(&self.code()).copied().unwrap_or_default()
    }

    /// Resolves a persisted numeric code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|currency| currency.code() == code)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<i32> for Currency {
    type Error = String;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("Unknown currency code: {code}"))
    }
}

/// Errors constructing an [`Amount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Amount is zero or negative.
    #[error("Amount must be positive, got {0}")]
    NotPositive(Decimal),

    /// Amount has more decimal places than a balance stores.
    #[error("Amount allows at most 4 decimal places, got {0}")]
    TooPrecise(Decimal),

    /// Amount is at or above the largest storable balance.
    #[error("Amount must be below 1000000000000, got {0}")]
    TooLarge(Decimal),
}

/// A strictly positive monetary amount.
///
/// Every ledger operation takes an `Amount`, so zero and negative values are
/// rejected before they reach a balance. Amounts also fit the balance columns,
/// `DECIMAL(16, 4)`: at most four decimal places and below
/// [`Amount::upper_bound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Total digits of a stored amount or balance.
    pub const PRECISION: u32 = 16;

    /// Decimal places of a stored amount or balance.
    pub const SCALE: u32 = 4;

    /// Exclusive ceiling for amounts and balances, `10^(PRECISION - SCALE)`.
    #[must_use]
    pub fn upper_bound() -> Decimal {
        Decimal::from(1_000_000_000_000_i64)
    }

    /// Creates a positive amount that a balance column can hold exactly.
    ///
    /// Trailing zeros do not count towards the scale, so `1.50000` is
    /// accepted.
    ///
    /// # Errors
    ///
    /// - `AmountError::NotPositive` if `value <= 0`.
    /// - `AmountError::TooPrecise` if it has more than four decimal places.
    /// - `AmountError::TooLarge` if `value >= upper_bound()`.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value <= Decimal::ZERO {
            return Err(AmountError::NotPositive(value));
        }
        if value.normalize().scale() > Self::SCALE {
            return Err(AmountError::TooPrecise(value));
        }
        if value >= Self::upper_bound() {
            return Err(AmountError::TooLarge(value));
        }
        Ok(Self(value))
    }

    /// Returns the decimal value.
    #[must_use]
    pub const fn value(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of balance-affecting operation recorded in a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Funds added to an account.
    Deposit,
    /// Funds removed from an account.
    Withdraw,
    /// Funds moved between two accounts.
    Transfer,
}

impl TransactionType {
    /// Returns the persisted tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Deposit => "DEPOSIT",
            Self::Withdraw => "WITHDRAW",
            Self::Transfer => "TRANSFER",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    /// Parses a persisted tag. Tags are matched exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DEPOSIT" => Ok(Self::Deposit),
            "WITHDRAW" => Ok(Self::Withdraw),
            "TRANSFER" => Ok(Self::Transfer),
            _ => Err(format!("Invalid transaction type: {s}")),
        }
    }
}
