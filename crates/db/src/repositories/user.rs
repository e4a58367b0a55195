//! User storage.

use async_trait::async_trait;
use bankline_core::auth::Credential;
use bankline_core::store::{IdentityStore, NewUser, StoreError, UserChanges, UserRecord};
use bankline_shared::types::UserId;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, EntityTrait, PaginatorTrait,
    QueryFilter, Set, Unchanged,
};

use super::{UnitOfWork, backend};
use crate::entities::users;

impl From<users::Model> for UserRecord {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            username: model.username,
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            credential: Credential {
                salt: model.salt,
                digest: model.password_digest,
            },
            active: model.active,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl IdentityStore for UnitOfWork {
    async fn find_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let user = users::active()
            .filter(users::Column::Username.eq(username))
            .one(&self.txn)
            .await
            .map_err(backend)?;
        Ok(user.map(UserRecord::from))
    }

    async fn find_user_by_email(&mut self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = users::active()
            .filter(users::Column::Email.eq(email))
            .one(&self.txn)
            .await
            .map_err(backend)?;
        Ok(user.map(UserRecord::from))
    }

    async fn identity_taken(&mut self, username: &str, email: &str) -> Result<bool, StoreError> {
        let count = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(username))
                    .add(users::Column::Email.eq(email)),
            )
            .count(&self.txn)
            .await
            .map_err(backend)?;
        Ok(count > 0)
    }

    async fn insert_user(&mut self, user: NewUser) -> Result<UserRecord, StoreError> {
        let model = users::ActiveModel {
            id: NotSet,
            username: Set(user.username),
            email: Set(user.email),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            password_digest: Set(user.credential.digest),
            salt: Set(user.credential.salt),
            active: Set(true),
            created_at: Set(user.created_at),
        }
        .insert(&self.txn)
        .await
        .map_err(backend)?;
        Ok(model.into())
    }

    async fn update_user(&mut self, id: UserId, changes: UserChanges) -> Result<(), StoreError> {
        let (salt, digest) = match changes.credential {
            Some(credential) => (Set(credential.salt), Set(credential.digest)),
            None => (NotSet, NotSet),
        };
        let user = users::ActiveModel {
            id: Unchanged(id.into_inner()),
            first_name: changes.first_name.map_or(NotSet, Set),
            last_name: changes.last_name.map_or(NotSet, Set),
            password_digest: digest,
            salt,
            ..Default::default()
        };
        user.update(&self.txn).await.map_err(backend)?;
        Ok(())
    }

    async fn deactivate_user(&mut self, id: UserId) -> Result<(), StoreError> {
        let user = users::ActiveModel {
            id: Unchanged(id.into_inner()),
            active: Set(false),
            ..Default::default()
        };
        user.update(&self.txn).await.map_err(backend)?;
        Ok(())
    }
}
