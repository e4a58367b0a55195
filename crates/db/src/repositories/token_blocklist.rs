//! Revoked token storage.

use async_trait::async_trait;
use bankline_core::store::{RevocationStore, StoreError};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use uuid::Uuid;

use super::{UnitOfWork, backend};
use crate::entities::token_blocklist;

/// Token blocklist repository for the auth middleware.
#[derive(Debug, Clone)]
pub struct TokenBlocklistRepository {
    db: DatabaseConnection,
}

impl TokenBlocklistRepository {
    /// Creates a new token blocklist repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns true if the token id was revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn is_revoked(&self, jti: Uuid) -> Result<bool, DbErr> {
        revoked(&self.db, jti).await
    }

    /// Records a token id as revoked.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn revoke(&self, jti: Uuid, revoked_at: DateTime<Utc>) -> Result<(), DbErr> {
        insert(&self.db, jti, revoked_at).await
    }
}

#[async_trait]
impl RevocationStore for UnitOfWork {
    async fn revoke(&mut self, jti: Uuid, revoked_at: DateTime<Utc>) -> Result<(), StoreError> {
        insert(&self.txn, jti, revoked_at).await.map_err(backend)
    }

    async fn is_revoked(&mut self, jti: Uuid) -> Result<bool, StoreError> {
        revoked(&self.txn, jti).await.map_err(backend)
    }
}

async fn revoked<C: ConnectionTrait>(db: &C, jti: Uuid) -> Result<bool, DbErr> {
    let count = token_blocklist::Entity::find()
        .filter(token_blocklist::Column::Jti.eq(jti.to_string()))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Revoking the same id twice is a no-op.
async fn insert<C: ConnectionTrait>(
    db: &C,
    jti: Uuid,
    revoked_at: DateTime<Utc>,
) -> Result<(), DbErr> {
    if revoked(db, jti).await? {
        return Ok(());
    }

    token_blocklist::ActiveModel {
        id: NotSet,
        jti: Set(jti.to_string()),
        revoked_at: Set(revoked_at),
    }
    .insert(db)
    .await?;
    Ok(())
}
