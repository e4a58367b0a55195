//! Account storage.

use async_trait::async_trait;
use bankline_core::store::{AccountRecord, AccountStore, StoreError};
use bankline_shared::types::{AccountId, Currency, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, Unchanged,
};

use super::{UnitOfWork, backend};
use crate::entities::{accounts, users};

impl TryFrom<accounts::Model> for AccountRecord {
    type Error = StoreError;

    fn try_from(model: accounts::Model) -> Result<Self, Self::Error> {
        let currency = Currency::from_code(model.currency).ok_or_else(|| {
            StoreError::Backend(format!(
                "account {} has unknown currency code {}",
                model.id, model.currency
            ))
        })?;

        Ok(Self {
            id: AccountId::new(model.id),
            user_id: UserId::new(model.user_id),
            currency,
            balance: model.balance,
            active: model.active,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl AccountStore for UnitOfWork {
    async fn insert_account(
        &mut self,
        user_id: UserId,
        currency: Currency,
        created_at: DateTime<Utc>,
    ) -> Result<AccountRecord, StoreError> {
        let model = accounts::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.into_inner()),
            currency: Set(currency.code()),
            balance: Set(Decimal::ZERO),
            active: Set(true),
            created_at: Set(created_at),
        }
        .insert(&self.txn)
        .await
        .map_err(backend)?;
        model.try_into()
    }

    async fn find_account(
        &mut self,
        user_id: UserId,
        account_id: AccountId,
    ) -> Result<Option<AccountRecord>, StoreError> {
        accounts::active()
            .filter(accounts::Column::Id.eq(account_id.into_inner()))
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .one(&self.txn)
            .await
            .map_err(backend)?
            .map(AccountRecord::try_from)
            .transpose()
    }

    async fn lock_accounts(&mut self, ids: &[AccountId]) -> Result<(), StoreError> {
        if ids.is_empty() || !self.supports_row_locks() {
            return Ok(());
        }

        accounts::Entity::find()
            .filter(accounts::Column::Id.is_in(ids.iter().copied().map(AccountId::into_inner)))
            .order_by_asc(accounts::Column::Id)
            .lock_exclusive()
            .all(&self.txn)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn accounts_by_user(&mut self, user_id: UserId) -> Result<Vec<AccountRecord>, StoreError> {
        accounts::active()
            .filter(accounts::Column::UserId.eq(user_id.into_inner()))
            .order_by_asc(accounts::Column::Id)
            .all(&self.txn)
            .await
            .map_err(backend)?
            .into_iter()
            .map(AccountRecord::try_from)
            .collect()
    }

    async fn set_balance(
        &mut self,
        account_id: AccountId,
        balance: Decimal,
    ) -> Result<(), StoreError> {
        let account = accounts::ActiveModel {
            id: Unchanged(account_id.into_inner()),
            balance: Set(balance),
            ..Default::default()
        };
        account.update(&self.txn).await.map_err(backend)?;
        Ok(())
    }

    async fn deactivate_account(&mut self, account_id: AccountId) -> Result<(), StoreError> {
        let account = accounts::ActiveModel {
            id: Unchanged(account_id.into_inner()),
            active: Set(false),
            ..Default::default()
        };
        account.update(&self.txn).await.map_err(backend)?;
        Ok(())
    }

    async fn account_owner(&mut self, account_id: AccountId) -> Result<Option<String>, StoreError> {
        let row = accounts::Entity::find_by_id(account_id.into_inner())
            .find_also_related(users::Entity)
            .one(&self.txn)
            .await
            .map_err(backend)?;
        Ok(row.and_then(|(_, user)| user).map(|user| user.username))
    }
}
