//! Store interfaces the domain services run against.
//!
//! The database crate implements these traits over a single database
//! transaction. Every "find" method only returns active rows unless its
//! documentation says otherwise.

use async_trait::async_trait;
use bankline_shared::types::{AccountId, Amount, Currency, TransactionId, TransactionType, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Credential;

#[cfg(test)]
pub mod memory;

/// Failure reported by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed to execute a query.
    #[error("{0}")]
    Backend(String),
}

/// Persisted user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Database id.
    pub id: UserId,
    /// Unique username.
    pub username: String,
    /// Unique, lower-cased email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Salted password digest.
    pub credential: Credential,
    /// Soft-deactivation flag.
    pub active: bool,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// User to insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Unique username.
    pub username: String,
    /// Lower-cased email.
    pub email: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Salted password digest.
    pub credential: Credential,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Profile fields to overwrite. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New salted password digest.
    pub credential: Option<Credential>,
}

impl UserChanges {
    /// Returns true when nothing would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.credential.is_none()
    }
}

/// Persisted currency account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Database id.
    pub id: AccountId,
    /// Owning user. Never changes.
    pub user_id: UserId,
    /// Currency fixed at creation.
    pub currency: Currency,
    /// Current balance, never negative.
    pub balance: Decimal,
    /// Soft-deactivation flag.
    pub active: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Persisted transaction record.
///
/// `kind` holds the raw stored tag; the domain parses it when reading history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Database id.
    pub id: TransactionId,
    /// Stored type tag.
    pub kind: String,
    /// Debited account (same as receiver for deposit and withdraw).
    pub sender_account_id: AccountId,
    /// Credited account (same as sender for deposit and withdraw).
    pub receiver_account_id: AccountId,
    /// Positive amount.
    pub amount: Decimal,
    /// Time of the operation.
    pub created_at: DateTime<Utc>,
}

/// Transaction record to append.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Operation type.
    pub kind: TransactionType,
    /// Debited account.
    pub sender_account_id: AccountId,
    /// Credited account.
    pub receiver_account_id: AccountId,
    /// Positive amount.
    pub amount: Amount,
    /// Time of the operation.
    pub created_at: DateTime<Utc>,
}

/// Side of a transaction an account appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    /// Account is `sender_account_id`.
    Sender,
    /// Account is `receiver_account_id`.
    Receiver,
}

/// User lookups and writes.
#[async_trait]
pub trait IdentityStore: Send {
    /// Finds an active user by exact username.
    async fn find_user_by_username(&mut self, username: &str)
    -> Result<Option<UserRecord>, StoreError>;

    /// Finds an active user by lower-cased email.
    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Returns true if any user row, active or not, uses the username or email.
    async fn identity_taken(&mut self, username: &str, email: &str) -> Result<bool, StoreError>;

    /// Inserts a new active user.
    async fn insert_user(&mut self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// Applies profile changes.
    async fn update_user(&mut self, id: UserId, changes: UserChanges) -> Result<(), StoreError>;

    /// Marks the user inactive.
    async fn deactivate_user(&mut self, id: UserId) -> Result<(), StoreError>;
}

/// Account lookups and writes.
#[async_trait]
pub trait AccountStore: Send {
    /// Inserts an active account with a zero balance.
    async fn insert_account(
        &mut self,
        user_id: UserId,
        currency: Currency,
        created_at: DateTime<Utc>,
    ) -> Result<AccountRecord, StoreError>;

    /// Finds an account only if it is active and owned by `user_id`.
    async fn find_account(
        &mut self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Option<AccountRecord>, StoreError>;

    /// Locks the account rows for the rest of the unit of work.
    ///
    /// Callers pass ids in ascending order. Missing ids are ignored.
    async fn lock_accounts(&mut self, ids: &[AccountId]) -> Result<(), StoreError>;

    /// Lists the active accounts of a user in ascending id order.
    async fn accounts_by_user(&mut self, user_id: UserId) -> Result<Vec<AccountRecord>, StoreError>;

    /// Overwrites the balance of an account.
    async fn set_balance(&mut self, account_id: AccountId, balance: Decimal)
    -> Result<(), StoreError>;

    /// Marks the account inactive.
    async fn deactivate_account(&mut self, account_id: AccountId) -> Result<(), StoreError>;

    /// Returns the username owning the account, whether or not either is active.
    async fn account_owner(&mut self, account_id: AccountId) -> Result<Option<String>, StoreError>;
}

/// Transaction record storage.
#[async_trait]
pub trait TransactionStore: Send {
    /// Appends an immutable record.
    async fn append_transaction(
        &mut self,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, StoreError>;

    /// Lists records where the account plays `role`.
    async fn transactions_by_account(
        &mut self,
        account_id: AccountId,
        role: AccountRole,
    ) -> Result<Vec<TransactionRecord>, StoreError>;
}

/// Revoked token storage.
#[async_trait]
pub trait RevocationStore: Send {
    /// Records a token id as revoked.
    async fn revoke(&mut self, jti: Uuid, revoked_at: DateTime<Utc>) -> Result<(), StoreError>;

    /// Returns true if the token id was revoked.
    async fn is_revoked(&mut self, jti: Uuid) -> Result<bool, StoreError>;
}

/// Everything a ledger operation needs from storage.
pub trait LedgerStore: IdentityStore + AccountStore + TransactionStore {}

impl<T> LedgerStore for T where T: IdentityStore + AccountStore + TransactionStore + ?Sized {}
