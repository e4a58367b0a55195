//! In-memory store used by the domain tests.

use async_trait::async_trait;
use bankline_shared::types::{AccountId, Currency, TransactionId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{
    AccountRecord, AccountRole, AccountStore, IdentityStore, NewTransaction, NewUser,
    RevocationStore, StoreError, TransactionRecord, TransactionStore, UserChanges, UserRecord,
};
use crate::auth::{Credential, CredentialHasher, PasswordError};

/// Tables held in vectors, ids assigned from 1.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub users: Vec<UserRecord>,
    pub accounts: Vec<AccountRecord>,
    pub transactions: Vec<TransactionRecord>,
    pub revoked: Vec<Uuid>,
    /// Every id passed to `lock_accounts`, in call order.
    pub locks: Vec<AccountId>,
    /// When set, `append_transaction` fails.
    pub fail_appends: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, id: AccountId) -> &AccountRecord {
        self.accounts
            .iter()
            .find(|a| a.id == id)
            .expect("account exists")
    }

    pub fn balance(&self, id: AccountId) -> Decimal {
        self.account(id).balance
    }

    /// Inserts an active user with a plaintext test credential.
    pub fn seed_user(&mut self, username: &str) -> UserId {
        let id = UserId::new(i64::try_from(self.users.len()).unwrap() + 1);
        self.users.push(UserRecord {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            first_name: username.to_string(),
            last_name: "Test".to_string(),
            credential: PlainHasher.hash("password").unwrap(),
            active: true,
            created_at: Utc::now(),
        });
        id
    }

    /// Inserts an active account holding `balance`.
    pub fn seed_account(&mut self, user_id: UserId, currency: Currency, balance: Decimal) -> AccountId {
        let id = AccountId::new(i64::try_from(self.accounts.len()).unwrap() + 1);
        self.accounts.push(AccountRecord {
            id,
            user_id,
            currency,
            balance,
            active: true,
            created_at: Utc::now(),
        });
        id
    }

    /// Inserts a raw transaction row, bypassing the engine.
    pub fn seed_transaction(
        &mut self,
        kind: &str,
        sender: AccountId,
        receiver: AccountId,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> TransactionId {
        let id = TransactionId::new(i64::try_from(self.transactions.len()).unwrap() + 1);
        self.transactions.push(TransactionRecord {
            id,
            kind: kind.to_string(),
            sender_account_id: sender,
            receiver_account_id: receiver,
            amount,
            created_at,
        });
        id
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.active && u.username == username)
            .cloned())
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.active && u.email == email)
            .cloned())
    }

    async fn identity_taken(&mut self, username: &str, email: &str) -> Result<bool, StoreError> {
        Ok(self
            .users
            .iter()
            .any(|u| u.username == username || u.email == email))
    }

    async fn insert_user(&mut self, user: NewUser) -> Result<UserRecord, StoreError> {
        let record = UserRecord {
            id: UserId::new(i64::try_from(self.users.len()).unwrap() + 1),
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            credential: user.credential,
            active: true,
            created_at: user.created_at,
        };
        self.users.push(record.clone());
        Ok(record)
    }

    async fn update_user(&mut self, id: UserId, changes: UserChanges) -> Result<(), StoreError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::Backend("no such user".into()))?;
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(credential) = changes.credential {
            user.credential = credential;
        }
        Ok(())
    }

    async fn deactivate_user(&mut self, id: UserId) -> Result<(), StoreError> {
        for user in self.users.iter_mut().filter(|u| u.id == id) {
            user.active = false;
        }
        Ok(())
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn insert_account(
        &mut self,
        user_id: UserId,
        currency: Currency,
        created_at: DateTime<Utc>,
    ) -> Result<AccountRecord, StoreError> {
        let record = AccountRecord {
            id: AccountId::new(i64::try_from(self.accounts.len()).unwrap() + 1),
            user_id,
            currency,
            balance: Decimal::ZERO,
            active: true,
            created_at,
        };
        self.accounts.push(record.clone());
        Ok(record)
    }

    async fn find_account(
        &mut self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Option<AccountRecord>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.active && a.id == account_id && a.user_id == user_id)
            .cloned())
    }

    async fn lock_accounts(&mut self, ids: &[AccountId]) -> Result<(), StoreError> {
        self.locks.extend_from_slice(ids);
        Ok(())
    }

    async fn accounts_by_user(&mut self, user_id: UserId) -> Result<Vec<AccountRecord>, StoreError> {
        let mut accounts: Vec<_> = self
            .accounts
            .iter()
            .filter(|a| a.active && a.user_id == user_id)
            .cloned()
            .collect();
        accounts.sort_by_key(|a| a.id);
        Ok(accounts)
    }

    async fn set_balance(&mut self, account_id: AccountId, balance: Decimal) -> Result<(), StoreError> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| StoreError::Backend("no such account".into()))?;
        account.balance = balance;
        Ok(())
    }

    async fn deactivate_account(&mut self, account_id: AccountId) -> Result<(), StoreError> {
        for account in self.accounts.iter_mut().filter(|a| a.id == account_id) {
            account.active = false;
        }
        Ok(())
    }

    async fn account_owner(&mut self, account_id: AccountId) -> Result<Option<String>, StoreError> {
        let owner = self
            .accounts
            .iter()
            .find(|a| a.id == account_id)
            .and_then(|a| self.users.iter().find(|u| u.id == a.user_id))
            .map(|u| u.username.clone());
        Ok(owner)
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn append_transaction(
        &mut self,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, StoreError> {
        if self.fail_appends {
            return Err(StoreError::Backend("append rejected".into()));
        }
        let record = TransactionRecord {
            id: TransactionId::new(i64::try_from(self.transactions.len()).unwrap() + 1),
            kind: transaction.kind.tag().to_string(),
            sender_account_id: transaction.sender_account_id,
            receiver_account_id: transaction.receiver_account_id,
            amount: transaction.amount.value(),
            created_at: transaction.created_at,
        };
        self.transactions.push(record.clone());
        Ok(record)
    }

    async fn transactions_by_account(
        &mut self,
        account_id: AccountId,
        role: AccountRole,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        Ok(self
            .transactions
            .iter()
            .filter(|t| match role {
                AccountRole::Sender => t.sender_account_id == account_id,
                AccountRole::Receiver => t.receiver_account_id == account_id,
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RevocationStore for MemoryStore {
    async fn revoke(&mut self, jti: Uuid, _revoked_at: DateTime<Utc>) -> Result<(), StoreError> {
        self.revoked.push(jti);
        Ok(())
    }

    async fn is_revoked(&mut self, jti: Uuid) -> Result<bool, StoreError> {
        Ok(self.revoked.contains(&jti))
    }
}

/// Reversible hasher so identity tests avoid Argon2 cost.
#[derive(Debug, Clone, Copy)]
pub struct PlainHasher;

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<Credential, PasswordError> {
        Ok(Credential {
            salt: "salt".to_string(),
            digest: format!("plain:{password}"),
        })
    }

    fn verify(&self, password: &str, credential: &Credential) -> Result<bool, PasswordError> {
        Ok(credential.digest == format!("plain:{password}"))
    }
}
