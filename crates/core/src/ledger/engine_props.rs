//! Property-based tests for LedgerEngine.
//!
//! - Balances never go negative under any operation sequence
//! - Transfers conserve the sum of both balances
//! - Deposit followed by an equal withdraw restores the balance
//! - Overdrawing withdraws fail and change nothing
//! - Self-transfers and cross-currency transfers always fail

use bankline_shared::types::{AccountId, Amount, Currency};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::LedgerEngine;
use super::error::LedgerError;
use super::types::TransferRequest;
use crate::store::memory::MemoryStore;

/// Strategy to generate positive decimal amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate non-negative starting balances.
fn balance() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// One step of a random operation sequence.
#[derive(Debug, Clone)]
enum Op {
    Deposit(usize, Decimal),
    Withdraw(usize, Decimal),
    Transfer(usize, Decimal),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..2, positive_amount()).prop_map(|(i, a)| Op::Deposit(i, a)),
        (0usize..2, positive_amount()).prop_map(|(i, a)| Op::Withdraw(i, a)),
        (0usize..2, positive_amount()).prop_map(|(i, a)| Op::Transfer(i, a)),
    ]
}

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

/// alice and bob, each with one USD account.
fn pair(alice_balance: Decimal, bob_balance: Decimal) -> (MemoryStore, [AccountId; 2]) {
    let mut store = MemoryStore::new();
    let alice = store.seed_user("alice");
    let bob = store.seed_user("bob");
    let a = store.seed_account(alice, Currency::Usd, alice_balance);
    let b = store.seed_account(bob, Currency::Usd, bob_balance);
    (store, [a, b])
}

const OWNERS: [&str; 2] = ["alice", "bob"];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_balances_never_negative(
        start in (balance(), balance()),
        ops in prop::collection::vec(op_strategy(), 1..30),
    ) {
        let (mut store, accounts) = pair(start.0, start.1);

        run(async {
            for op in ops {
                let _ = match op {
                    Op::Deposit(i, a) => LedgerEngine::deposit(
                        &mut store, OWNERS[i], accounts[i], Amount::new(a).unwrap(),
                    ).await,
                    Op::Withdraw(i, a) => LedgerEngine::withdraw(
                        &mut store, OWNERS[i], accounts[i], Amount::new(a).unwrap(),
                    ).await,
                    Op::Transfer(i, a) => LedgerEngine::transfer(
                        &mut store,
                        OWNERS[i],
                        &TransferRequest {
                            sender_account_id: accounts[i],
                            receiver_username: OWNERS[1 - i].to_string(),
                            receiver_account_id: accounts[1 - i],
                            amount: Amount::new(a).unwrap(),
                        },
                    ).await,
                };
            }
        });

        for account in &store.accounts {
            prop_assert!(account.balance >= Decimal::ZERO);
        }
    }

    #[test]
    fn prop_transfer_conserves_sum(
        start in (balance(), balance()),
        value in positive_amount(),
    ) {
        let (mut store, [a, b]) = pair(start.0, start.1);
        let before = start.0 + start.1;

        let result = run(LedgerEngine::transfer(
            &mut store,
            "alice",
            &TransferRequest {
                sender_account_id: a,
                receiver_username: "bob".to_string(),
                receiver_account_id: b,
                amount: Amount::new(value).unwrap(),
            },
        ));

        prop_assert_eq!(store.balance(a) + store.balance(b), before);
        if value <= start.0 {
            prop_assert!(result.is_ok());
            prop_assert_eq!(store.balance(a), start.0 - value);
            prop_assert_eq!(store.balance(b), start.1 + value);
        } else {
            prop_assert!(matches!(result, Err(LedgerError::InsufficientFunds)));
            prop_assert_eq!(store.balance(a), start.0);
        }
    }

    #[test]
    fn prop_deposit_then_withdraw_restores_balance(
        start in balance(),
        value in positive_amount(),
    ) {
        let (mut store, [a, _]) = pair(start, Decimal::ZERO);
        let amount = Amount::new(value).unwrap();

        run(async {
            LedgerEngine::deposit(&mut store, "alice", a, amount).await.unwrap();
            LedgerEngine::withdraw(&mut store, "alice", a, amount).await.unwrap();
        });

        prop_assert_eq!(store.balance(a), start);
        prop_assert_eq!(store.transactions.len(), 2);
    }

    #[test]
    fn prop_overdraw_fails_without_effect(
        start in balance(),
        excess in positive_amount(),
    ) {
        let (mut store, [a, _]) = pair(start, Decimal::ZERO);

        let result = run(LedgerEngine::withdraw(
            &mut store,
            "alice",
            a,
            Amount::new(start + excess).unwrap(),
        ));

        prop_assert!(matches!(result, Err(LedgerError::InsufficientFunds)));
        prop_assert_eq!(store.balance(a), start);
        prop_assert!(store.transactions.is_empty());
    }

    #[test]
    fn prop_self_transfer_always_fails(
        start in balance(),
        value in positive_amount(),
        same_account in any::<bool>(),
    ) {
        let (mut store, [a, b]) = pair(start, Decimal::ZERO);
        let request = if same_account {
            TransferRequest {
                sender_account_id: a,
                receiver_username: "bob".to_string(),
                receiver_account_id: a,
                amount: Amount::new(value).unwrap(),
            }
        } else {
            TransferRequest {
                sender_account_id: a,
                receiver_username: "alice".to_string(),
                receiver_account_id: b,
                amount: Amount::new(value).unwrap(),
            }
        };

        let result = run(LedgerEngine::transfer(&mut store, "alice", &request));

        prop_assert!(matches!(result, Err(LedgerError::SelfTransfer)));
        prop_assert_eq!(store.balance(a), start);
    }

    #[test]
    fn prop_cross_currency_transfer_fails(
        start in balance(),
        value in positive_amount(),
    ) {
        let mut store = MemoryStore::new();
        let alice = store.seed_user("alice");
        let bob = store.seed_user("bob");
        // always enough funds
        let a = store.seed_account(alice, Currency::Usd, start + value);
        let b = store.seed_account(bob, Currency::Lbp, Decimal::ZERO);

        let result = run(LedgerEngine::transfer(
            &mut store,
            "alice",
            &TransferRequest {
                sender_account_id: a,
                receiver_username: "bob".to_string(),
                receiver_account_id: b,
                amount: Amount::new(value).unwrap(),
            },
        ));

        prop_assert!(matches!(result, Err(LedgerError::CurrencyMismatch)));
        prop_assert_eq!(store.balance(a), start + value);
        prop_assert_eq!(store.balance(b), Decimal::ZERO);
    }
}
