//! Account service: create, inspect, list, and deactivate accounts.

use bankline_shared::types::{AccountId, Currency};
use chrono::Utc;

use super::types::{AccountBalance, AccountSummary};
use crate::ledger::LedgerError;
use crate::ledger::engine::{resolve_account, resolve_user};
use crate::store::{AccountRecord, AccountStore, IdentityStore};

/// Account operations scoped to the acting user.
pub struct AccountService;

impl AccountService {
    /// Opens a zero-balance account in `currency` for `username`.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user is missing or inactive.
    pub async fn create<S>(
        store: &mut S,
        username: &str,
        currency: Currency,
    ) -> Result<AccountRecord, LedgerError>
    where
        S: IdentityStore + AccountStore,
    {
        let user = resolve_user(store, username).await?;
        let account = store.insert_account(user.id, currency, Utc::now()).await?;
        Ok(account)
    }

    /// Returns the balance of an account owned by `username`.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` or `AccountNotFound`.
    pub async fn balance<S>(
        store: &mut S,
        username: &str,
        account_id: AccountId,
    ) -> Result<AccountBalance, LedgerError>
    where
        S: IdentityStore + AccountStore,
    {
        let user = resolve_user(store, username).await?;
        let account = resolve_account(store, &user, account_id).await?;
        Ok(AccountBalance::from(&account))
    }

    /// Deactivates an empty account owned by `username`.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound`, `AccountNotFound`, or `NonZeroBalance` when the
    /// account still holds funds.
    pub async fn deactivate<S>(
        store: &mut S,
        username: &str,
        account_id: AccountId,
    ) -> Result<(), LedgerError>
    where
        S: IdentityStore + AccountStore,
    {
        let user = resolve_user(store, username).await?;
        store.lock_accounts(&[account_id]).await?;
        let account = resolve_account(store, &user, account_id).await?;

        if !account.balance.is_zero() {
            return Err(LedgerError::NonZeroBalance(account.id));
        }

        store.deactivate_account(account.id).await?;
        Ok(())
    }

    /// Lists the active accounts of `username` in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if the user is missing or inactive.
    pub async fn list<S>(store: &mut S, username: &str) -> Result<Vec<AccountSummary>, LedgerError>
    where
        S: IdentityStore + AccountStore,
    {
        let user = resolve_user(store, username).await?;
        let accounts = store.accounts_by_user(user.id).await?;
        Ok(accounts.iter().map(AccountSummary::from).collect())
    }
}
