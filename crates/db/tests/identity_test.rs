//! Integration tests for user storage.

mod common;

use bankline_core::LedgerError;
use bankline_core::identity::{IdentityService, LoginIdentity, ProfileUpdate, Registration};
use bankline_core::ledger::LedgerEngine;
use bankline_core::store::IdentityStore;
use bankline_db::UnitOfWorkExt;
use bankline_shared::types::{Amount, Currency};
use rust_decimal_macros::dec;

use common::{PlainHasher, open_account, register, setup};

#[tokio::test]
async fn test_register_and_login_by_email() {
    let db = setup().await;
    register(&db, "alice").await;

    let mut uow = db.unit_of_work().await.unwrap();
    let user = IdentityService::authenticate(
        &mut uow,
        &PlainHasher,
        &LoginIdentity::Email("ALICE@example.com".to_string()),
        "password123",
    )
    .await
    .unwrap();
    uow.commit().await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.credential.salt, "salt");
}

#[tokio::test]
async fn test_duplicate_identity_rejected() {
    let db = setup().await;
    register(&db, "alice").await;

    let mut uow = db.unit_of_work().await.unwrap();
    let outcome = IdentityService::register(
        &mut uow,
        &PlainHasher,
        Registration {
            first_name: "Other".to_string(),
            last_name: "Person".to_string(),
            username: "someone".to_string(),
            email: "Alice@Example.com".to_string(),
            password: "password123".to_string(),
        },
    )
    .await;
    let result = uow.finish(outcome).await;

    assert!(matches!(result, Err(LedgerError::AlreadyExists)));
}

#[tokio::test]
async fn test_update_profile_persists() {
    let db = setup().await;
    register(&db, "alice").await;

    let mut uow = db.unit_of_work().await.unwrap();
    let outcome = IdentityService::update(
        &mut uow,
        &PlainHasher,
        "alice",
        ProfileUpdate {
            first_name: Some("Alicia".to_string()),
            last_name: None,
            new_password: Some("changed".to_string()),
        },
    )
    .await;
    uow.finish(outcome).await.unwrap();

    let mut uow = db.unit_of_work().await.unwrap();
    let profile = IdentityService::profile(&mut uow, "alice").await.unwrap();
    let login = IdentityService::authenticate(
        &mut uow,
        &PlainHasher,
        &LoginIdentity::Username("alice".to_string()),
        "changed",
    )
    .await;
    uow.commit().await.unwrap();

    assert_eq!(profile.first_name, "Alicia");
    assert_eq!(profile.last_name, "User");
    assert!(login.is_ok());
}

#[tokio::test]
async fn test_deactivate_user_keeps_identity_reserved() {
    let db = setup().await;
    register(&db, "alice").await;
    open_account(&db, "alice", Currency::Usd).await;

    let mut uow = db.unit_of_work().await.unwrap();
    let outcome = IdentityService::deactivate(&mut uow, "alice").await;
    uow.finish(outcome).await.unwrap();

    let mut uow = db.unit_of_work().await.unwrap();
    let found = uow.find_user_by_username("alice").await.unwrap();
    let taken = uow
        .identity_taken("alice", "fresh@example.com")
        .await
        .unwrap();
    uow.commit().await.unwrap();

    assert!(found.is_none());
    assert!(taken);
}

#[tokio::test]
async fn test_deactivate_user_blocked_by_balance() {
    let db = setup().await;
    register(&db, "alice").await;
    let account = open_account(&db, "alice", Currency::Lbp).await;

    let mut uow = db.unit_of_work().await.unwrap();
    let outcome =
        LedgerEngine::deposit(&mut uow, "alice", account, Amount::new(dec!(3)).unwrap()).await;
    uow.finish(outcome).await.unwrap();

    let mut uow = db.unit_of_work().await.unwrap();
    let outcome = IdentityService::deactivate(&mut uow, "alice").await;
    let result = uow.finish(outcome).await;

    assert!(matches!(result, Err(LedgerError::NonZeroBalance(id)) if id == account));

    let mut uow = db.unit_of_work().await.unwrap();
    let found = uow.find_user_by_username("alice").await.unwrap();
    uow.commit().await.unwrap();
    assert!(found.is_some());
}
