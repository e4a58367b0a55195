//! Integration tests for token revocation.

mod common;

use bankline_core::identity::IdentityService;
use bankline_core::store::RevocationStore;
use bankline_db::{TokenBlocklistRepository, UnitOfWorkExt};
use chrono::Utc;
use uuid::Uuid;

use common::{register, setup};

#[tokio::test]
async fn test_revoked_token_visible_to_repository() {
    let db = setup().await;
    register(&db, "alice").await;
    let jti = Uuid::new_v4();

    let mut uow = db.unit_of_work().await.unwrap();
    let outcome = IdentityService::revoke_token(&mut uow, "alice", jti).await;
    uow.finish(outcome).await.unwrap();

    let repo = TokenBlocklistRepository::new(db.clone());
    assert!(repo.is_revoked(jti).await.unwrap());
    assert!(!repo.is_revoked(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_revoke_twice_is_noop() {
    let db = setup().await;
    let repo = TokenBlocklistRepository::new(db.clone());
    let jti = Uuid::new_v4();

    repo.revoke(jti, Utc::now()).await.unwrap();
    repo.revoke(jti, Utc::now()).await.unwrap();

    let mut uow = db.unit_of_work().await.unwrap();
    let revoked = uow.is_revoked(jti).await.unwrap();
    uow.commit().await.unwrap();
    assert!(revoked);
}

#[tokio::test]
async fn test_revocation_rolled_back_with_unit_of_work() {
    let db = setup().await;
    let jti = Uuid::new_v4();

    let mut uow = db.unit_of_work().await.unwrap();
    uow.revoke(jti, Utc::now()).await.unwrap();
    uow.rollback().await.unwrap();

    let repo = TokenBlocklistRepository::new(db);
    assert!(!repo.is_revoked(jti).await.unwrap());
}
