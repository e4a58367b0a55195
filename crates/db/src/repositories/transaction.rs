//! Transaction record storage.

use async_trait::async_trait;
use bankline_core::store::{
    AccountRole, NewTransaction, StoreError, TransactionRecord, TransactionStore,
};
use bankline_shared::types::{AccountId, TransactionId};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{UnitOfWork, backend};
use crate::entities::transactions;

impl From<transactions::Model> for TransactionRecord {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: TransactionId::new(model.id),
            kind: model.kind,
            sender_account_id: AccountId::new(model.sender_id),
            receiver_account_id: AccountId::new(model.receiver_id),
            amount: model.amount,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl TransactionStore for UnitOfWork {
    async fn append_transaction(
        &mut self,
        transaction: NewTransaction,
    ) -> Result<TransactionRecord, StoreError> {
        let model = transactions::ActiveModel {
            id: NotSet,
            kind: Set(transaction.kind.tag().to_string()),
            sender_id: Set(transaction.sender_account_id.into_inner()),
            receiver_id: Set(transaction.receiver_account_id.into_inner()),
            amount: Set(transaction.amount.value()),
            created_at: Set(transaction.created_at),
        }
        .insert(&self.txn)
        .await
        .map_err(backend)?;
        Ok(model.into())
    }

    async fn transactions_by_account(
        &mut self,
        account_id: AccountId,
        role: AccountRole,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let column = match role {
            AccountRole::Sender => transactions::Column::SenderId,
            AccountRole::Receiver => transactions::Column::ReceiverId,
        };

        let records = transactions::Entity::find()
            .filter(column.eq(account_id.into_inner()))
            .order_by_asc(transactions::Column::Id)
            .all(&self.txn)
            .await
            .map_err(backend)?;
        Ok(records.into_iter().map(TransactionRecord::from).collect())
    }
}
