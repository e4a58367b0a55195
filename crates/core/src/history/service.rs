//! History reconstruction over the transaction store.

use std::cmp::Reverse;
use std::collections::HashMap;

use bankline_shared::types::{AccountId, TransactionType};
use tracing::error;

use super::types::HistoryEntry;
use crate::ledger::LedgerError;
use crate::ledger::engine::{resolve_account, resolve_user};
use crate::store::{AccountRole, AccountStore, IdentityStore, TransactionRecord, TransactionStore};

/// Reconstructs transaction history for accounts and users.
pub struct HistoryService;

impl HistoryService {
    /// History of one account owned by `username`, newest first.
    ///
    /// Ties on timestamp are broken by transaction id, highest first.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` / `AccountNotFound` when resolution fails.
    /// - `InvalidTransactionType` when a stored record has an unknown tag.
    pub async fn for_account<S>(
        store: &mut S,
        username: &str,
        account_id: AccountId,
    ) -> Result<Vec<HistoryEntry>, LedgerError>
    where
        S: IdentityStore + AccountStore + TransactionStore,
    {
        let user = resolve_user(store, username).await?;
        let account = resolve_account(store, &user, account_id).await?;
        account_history(store, account.id).await
    }

    /// History of every active account of `username`.
    ///
    /// Accounts are visited in ascending id order and their histories are
    /// concatenated; each run is newest first but the result as a whole is
    /// not re-sorted.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` when the user is missing or inactive.
    /// - `InvalidTransactionType` when a stored record has an unknown tag.
    pub async fn for_user<S>(store: &mut S, username: &str) -> Result<Vec<HistoryEntry>, LedgerError>
    where
        S: IdentityStore + AccountStore + TransactionStore,
    {
        let user = resolve_user(store, username).await?;
        let accounts = store.accounts_by_user(user.id).await?;

        let mut entries = Vec::new();
        for account in accounts {
            entries.extend(account_history(store, account.id).await?);
        }
        Ok(entries)
    }
}

async fn account_history<S>(
    store: &mut S,
    account_id: AccountId,
) -> Result<Vec<HistoryEntry>, LedgerError>
where
    S: AccountStore + TransactionStore,
{
    let mut records = store
        .transactions_by_account(account_id, AccountRole::Sender)
        .await?;
    records.extend(
        store
            .transactions_by_account(account_id, AccountRole::Receiver)
            .await?,
    );

    // Deposits and withdraws come back under both roles.
    records.sort_by_key(|record| Reverse((record.created_at, record.id)));
    records.dedup_by_key(|record| record.id);

    let mut owners = HashMap::new();
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        entries.push(project(store, &mut owners, record).await?);
    }
    Ok(entries)
}

async fn project<S: AccountStore>(
    store: &mut S,
    owners: &mut HashMap<AccountId, String>,
    record: TransactionRecord,
) -> Result<HistoryEntry, LedgerError> {
    let kind: TransactionType = record.kind.parse().map_err(|_| {
        error!(
            transaction_id = %record.id,
            tag = %record.kind,
            "Stored transaction has an unknown type tag"
        );
        LedgerError::InvalidTransactionType(record.kind.clone())
    })?;

    let entry = match kind {
        TransactionType::Deposit => HistoryEntry::Deposit {
            amount: record.amount,
            date: record.created_at,
            account_id: record.receiver_account_id,
        },
        TransactionType::Withdraw => HistoryEntry::Withdraw {
            amount: record.amount,
            date: record.created_at,
            account_id: record.receiver_account_id,
        },
        TransactionType::Transfer => HistoryEntry::Transfer {
            amount: record.amount,
            date: record.created_at,
            sender: owner(store, owners, record.sender_account_id).await?,
            sender_account_id: record.sender_account_id,
            receiver: owner(store, owners, record.receiver_account_id).await?,
            receiver_account_id: record.receiver_account_id,
        },
    };
    Ok(entry)
}

async fn owner<S: AccountStore>(
    store: &mut S,
    owners: &mut HashMap<AccountId, String>,
    account_id: AccountId,
) -> Result<String, LedgerError> {
    if let Some(username) = owners.get(&account_id) {
        return Ok(username.clone());
    }
    let username = store
        .account_owner(account_id)
        .await?
        .ok_or_else(|| LedgerError::Internal(format!("account {account_id} has no owner")))?;
    owners.insert(account_id, username.clone());
    Ok(username)
}
