//! Database seeder for Bankline development and testing.
//!
//! Seeds two demo users with funded accounts and one transfer between them.
//! Every step runs through the same services the API uses.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use bankline_core::LedgerError;
use bankline_core::accounts::AccountService;
use bankline_core::auth::Argon2Hasher;
use bankline_core::identity::{IdentityService, Registration};
use bankline_core::ledger::{LedgerEngine, TransferRequest};
use bankline_db::migration::{Migrator, MigratorTrait};
use bankline_db::{UnitOfWork, UnitOfWorkExt};
use bankline_shared::types::{AccountId, Amount, Currency};
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;

/// Password shared by all demo users.
const DEMO_PASSWORD: &str = "password123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = bankline_db::connect(&database_url).await?;
    Migrator::up(&db, None).await?;

    println!("Seeding demo users...");
    let alice_is_new = seed_user(&db, "alice", "Alice", "Liddell").await?;
    let bob_is_new = seed_user(&db, "bob", "Bob", "Builder").await?;
    if !(alice_is_new && bob_is_new) {
        println!("  Demo users already exist, skipping...");
        return Ok(());
    }

    println!("Seeding accounts...");
    let alice_usd = open(&db, "alice", Currency::Usd).await?;
    open(&db, "alice", Currency::Lbp).await?;
    let bob_usd = open(&db, "bob", Currency::Usd).await?;

    println!("Seeding transactions...");
    let mut uow = db.unit_of_work().await?;
    let outcome = seed_transactions(&mut uow, alice_usd, bob_usd).await;
    uow.finish(outcome).await?;

    println!("Seeding complete!");
    Ok(())
}

/// Registers a demo user. Returns false if the user already exists.
async fn seed_user(
    db: &DatabaseConnection,
    username: &str,
    first_name: &str,
    last_name: &str,
) -> anyhow::Result<bool> {
    let mut uow = db.unit_of_work().await?;
    let outcome = IdentityService::register(
        &mut uow,
        &Argon2Hasher,
        Registration {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            username: username.to_string(),
            email: format!("{username}@bankline.dev"),
            password: DEMO_PASSWORD.to_string(),
        },
    )
    .await;

    match uow.finish(outcome).await {
        Ok(_) => Ok(true),
        Err(LedgerError::AlreadyExists) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

async fn open(db: &DatabaseConnection, username: &str, currency: Currency) -> anyhow::Result<AccountId> {
    let mut uow = db.unit_of_work().await?;
    let outcome = AccountService::create(&mut uow, username, currency).await;
    Ok(uow.finish(outcome).await?.id)
}

async fn seed_transactions(
    uow: &mut UnitOfWork,
    alice_usd: AccountId,
    bob_usd: AccountId,
) -> Result<(), LedgerError> {
    let amount = |value| Amount::new(value).map_err(|e| LedgerError::Internal(e.to_string()));

    LedgerEngine::deposit(uow, "alice", alice_usd, amount(dec!(1000))?).await?;
    LedgerEngine::deposit(uow, "bob", bob_usd, amount(dec!(250))?).await?;
    LedgerEngine::withdraw(uow, "alice", alice_usd, amount(dec!(100))?).await?;
    LedgerEngine::transfer(
        uow,
        "alice",
        &TransferRequest {
            sender_account_id: alice_usd,
            receiver_username: "bob".to_string(),
            receiver_account_id: bob_usd,
            amount: amount(dec!(150))?,
        },
    )
    .await?;
    Ok(())
}
