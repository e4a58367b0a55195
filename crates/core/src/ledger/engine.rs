//! Ledger engine: deposit, withdraw, and transfer.
//!
//! Each operation validates completely before its first write, then applies
//! the balance change(s) and appends one transaction record. The caller runs
//! the operation inside a unit of work and rolls it back on any error, so a
//! failed operation leaves neither balances nor records behind.

use bankline_shared::types::{AccountId, Amount, TransactionType};
use chrono::Utc;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::TransferRequest;
use crate::store::{
    AccountRecord, AccountStore, IdentityStore, LedgerStore, NewTransaction, TransactionRecord,
    UserRecord,
};

/// Ledger engine applying balance-affecting operations.
///
/// This service holds no state; all data flows through the store.
pub struct LedgerEngine;

impl LedgerEngine {
    /// Adds `amount` to an account owned by `username`.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user is missing or inactive.
    /// - `AccountNotFound` if the account is missing, inactive, or not owned.
    /// - `BalanceLimitExceeded` if the new balance would reach
    ///   [`Amount::upper_bound`].
    pub async fn deposit<S: LedgerStore>(
        store: &mut S,
        username: &str,
        account_id: AccountId,
        amount: Amount,
    ) -> Result<TransactionRecord, LedgerError> {
        let user = resolve_user(store, username).await?;
        store.lock_accounts(&[account_id]).await?;
        let account = resolve_account(store, &user, account_id).await?;
        let balance = credit(account.balance, amount)?;

        store.set_balance(account.id, balance).await?;

        let record = store
            .append_transaction(single_account_record(
                TransactionType::Deposit,
                account.id,
                amount,
            ))
            .await?;

        Ok(record)
    }

    /// Removes `amount` from an account owned by `username`.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user is missing or inactive.
    /// - `AccountNotFound` if the account is missing, inactive, or not owned.
    /// - `InsufficientFunds` if the balance is lower than `amount`.
    pub async fn withdraw<S: LedgerStore>(
        store: &mut S,
        username: &str,
        account_id: AccountId,
        amount: Amount,
    ) -> Result<TransactionRecord, LedgerError> {
        let user = resolve_user(store, username).await?;
        store.lock_accounts(&[account_id]).await?;
        let account = resolve_account(store, &user, account_id).await?;
        let balance = debit(account.balance, amount)?;

        store.set_balance(account.id, balance).await?;

        let record = store
            .append_transaction(single_account_record(
                TransactionType::Withdraw,
                account.id,
                amount,
            ))
            .await?;

        Ok(record)
    }

    /// Moves funds from an account of `username` to another user's account.
    ///
    /// Checks run in a fixed order:
    /// 1. Self-transfer, by identifiers only
    /// 2. Acting user, then receiver user
    /// 3. Row locks on both accounts in ascending id order
    /// 4. Sender account, then receiver account
    /// 5. Currency match
    /// 6. Sufficient funds
    /// 7. Receiver balance limit
    ///
    /// # Errors
    ///
    /// - `SelfTransfer` if the accounts or the usernames are equal.
    /// - `UserNotFound` / `ReceiverNotFound` for missing users.
    /// - `AccountNotFound` / `ReceiverAccountNotFound` for missing accounts.
    /// - `CurrencyMismatch` if the currencies differ.
    /// - `InsufficientFunds` if the sender balance is lower than the amount.
    /// - `BalanceLimitExceeded` if the receiver balance would reach
    ///   [`Amount::upper_bound`].
    pub async fn transfer<S: LedgerStore>(
        store: &mut S,
        username: &str,
        request: &TransferRequest,
    ) -> Result<TransactionRecord, LedgerError> {
        if request.is_self_transfer(username) {
            return Err(LedgerError::SelfTransfer);
        }

        let user = resolve_user(store, username).await?;
        let receiver_user = store
            .find_user_by_username(&request.receiver_username)
            .await?
            .ok_or(LedgerError::ReceiverNotFound)?;

        store.lock_accounts(&request.lock_order()).await?;

        let sender = resolve_account(store, &user, request.sender_account_id).await?;
        let receiver = store
            .find_account(receiver_user.id, request.receiver_account_id)
            .await?
            .ok_or(LedgerError::ReceiverAccountNotFound)?;

        if sender.currency != receiver.currency {
            return Err(LedgerError::CurrencyMismatch);
        }

        let sender_balance = debit(sender.balance, request.amount)?;
        let receiver_balance = credit(receiver.balance, request.amount)?;

        store.set_balance(sender.id, sender_balance).await?;
        store.set_balance(receiver.id, receiver_balance).await?;

        let record = store
            .append_transaction(NewTransaction {
                kind: TransactionType::Transfer,
                sender_account_id: sender.id,
                receiver_account_id: receiver.id,
                amount: request.amount,
                created_at: Utc::now(),
            })
            .await?;

        Ok(record)
    }
}

/// Resolves an active user by username.
///
/// # Errors
///
/// Returns `UserNotFound` if no active user has this username.
pub(crate) async fn resolve_user<S: IdentityStore>(
    store: &mut S,
    username: &str,
) -> Result<UserRecord, LedgerError> {
    store
        .find_user_by_username(username)
        .await?
        .ok_or(LedgerError::UserNotFound)
}

/// Resolves an active account owned by `user`.
///
/// # Errors
///
/// Returns `AccountNotFound` if the account is missing, inactive, or owned by
/// someone else.
pub(crate) async fn resolve_account<S: AccountStore>(
    store: &mut S,
    user: &UserRecord,
    account_id: AccountId,
) -> Result<AccountRecord, LedgerError> {
    store
        .find_account(user.id, account_id)
        .await?
        .ok_or(LedgerError::AccountNotFound)
}

/// Balance after adding `amount`, kept below the storable bound.
fn credit(balance: Decimal, amount: Amount) -> Result<Decimal, LedgerError> {
    balance
        .checked_add(amount.value())
        .filter(|total| *total < Amount::upper_bound())
        .ok_or(LedgerError::BalanceLimitExceeded)
}

/// Balance after removing `amount`, never negative.
fn debit(balance: Decimal, amount: Amount) -> Result<Decimal, LedgerError> {
    balance
        .checked_sub(amount.value())
        .filter(|rest| *rest >= Decimal::ZERO)
        .ok_or(LedgerError::InsufficientFunds)
}

fn single_account_record(
    kind: TransactionType,
    account_id: AccountId,
    amount: Amount,
) -> NewTransaction {
    NewTransaction {
        kind,
        sender_account_id: account_id,
        receiver_account_id: account_id,
        amount,
        created_at: Utc::now(),
    }
}
