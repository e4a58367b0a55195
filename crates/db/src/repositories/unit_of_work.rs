//! Transaction-scoped store.
//!
//! ```ignore
//! use bankline_db::UnitOfWorkExt;
//!
//! let mut uow = db.unit_of_work().await?;
//! let outcome = LedgerEngine::deposit(&mut uow, "alice", account_id, amount).await;
//! let record = uow.finish(outcome).await?;
//! ```

use bankline_core::LedgerError;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, TransactionTrait,
};
use tracing::warn;

/// One database transaction that every store trait runs against.
///
/// Dropping a unit of work without committing rolls it back.
pub struct UnitOfWork {
    pub(crate) txn: DatabaseTransaction,
    backend: DbBackend,
}

impl UnitOfWork {
    /// Begins a new transaction on the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let backend = db.get_database_backend();
        let txn = db.begin().await?;
        Ok(Self { txn, backend })
    }

    /// Returns true when row locks are issued with `SELECT ... FOR UPDATE`.
    ///
    /// SQLite serializes writers itself and has no row locks.
    #[must_use]
    pub fn supports_row_locks(&self) -> bool {
        matches!(self.backend, DbBackend::Postgres | DbBackend::MySql)
    }

    /// Commits the transaction, persisting all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    /// Rolls back the transaction, discarding all changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback fails.
    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }

    /// Commits on `Ok` and rolls back on `Err`, passing the outcome through.
    ///
    /// # Errors
    ///
    /// Returns the original error, or `Database` if the commit fails.
    pub async fn finish<T>(self, outcome: Result<T, LedgerError>) -> Result<T, LedgerError> {
        match outcome {
            Ok(value) => {
                self.commit()
                    .await
                    .map_err(|e| LedgerError::Database(e.to_string()))?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = self.rollback().await {
                    warn!(error = %rollback, "Rollback failed");
                }
                Err(err)
            }
        }
    }
}

/// Extension trait for `DatabaseConnection` to open a unit of work.
#[async_trait::async_trait]
pub trait UnitOfWorkExt {
    /// Begins a unit of work.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction cannot be started.
    async fn unit_of_work(&self) -> Result<UnitOfWork, DbErr>;
}

#[async_trait::async_trait]
impl UnitOfWorkExt for DatabaseConnection {
    async fn unit_of_work(&self) -> Result<UnitOfWork, DbErr> {
        UnitOfWork::begin(self).await
    }
}
