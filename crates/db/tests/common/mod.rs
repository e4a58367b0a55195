//! Shared setup for database integration tests.

#![allow(dead_code)]

use bankline_core::accounts::AccountService;
use bankline_core::auth::{Credential, CredentialHasher, PasswordError};
use bankline_core::identity::{IdentityService, Registration};
use bankline_db::migration::{Migrator, MigratorTrait};
use bankline_db::{UnitOfWork, connect_with};
use bankline_shared::config::DatabaseConfig;
use bankline_shared::types::{AccountId, Currency};
use sea_orm::{DatabaseConnection, DbErr};

/// Stores passwords in the clear so tests skip Argon2.
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

/// Opens a fresh in-memory SQLite database with all migrations applied.
///
/// The pool holds exactly one connection, so a test must finish each unit of
/// work before touching the pool again.
pub async fn setup() -> DatabaseConnection {
    migrated("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory database")
}

/// Connects a pool of `max_connections` to `url` and applies all migrations.
pub async fn migrated(url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let config = DatabaseConfig {
        url: url.to_string(),
        max_connections,
        min_connections: 1,
        run_migrations: true,
    };
    let db = connect_with(&config).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Registers `username` with email `{username}@example.com`.
pub async fn register(db: &DatabaseConnection, username: &str) {
    let mut uow = UnitOfWork::begin(db).await.unwrap();
    let outcome = IdentityService::register(
        &mut uow,
        &PlainHasher,
        Registration {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "password123".to_string(),
        },
    )
    .await;
    uow.finish(outcome).await.unwrap();
}

/// Opens an account for `username`.
pub async fn open_account(
    db: &DatabaseConnection,
    username: &str,
    currency: Currency,
) -> AccountId {
    let mut uow = UnitOfWork::begin(db).await.unwrap();
    let outcome = AccountService::create(&mut uow, username, currency).await;
    uow.finish(outcome).await.unwrap().id
}
