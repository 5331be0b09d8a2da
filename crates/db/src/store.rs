//! Unit-of-work wrapper around the connection pool.

use std::time::Duration;

use futures::future::BoxFuture;
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use simplebank_shared::AppConfig;
use tracing::{error, warn};

use crate::error::StoreError;
use crate::queries::Queries;

/// Entry point for all database work: plain queries and transactional units of work.
///
/// Cloning is cheap; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    db: DatabaseConnection,
    lock_timeout: Option<Duration>,
}

impl Store {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            lock_timeout: None,
        }
    }

    /// Connects using the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(config: &AppConfig) -> Result<Self, DbErr> {
        let db = crate::connect_with(&config.database).await?;
        Ok(Self::new(db).with_lock_timeout(config.transfer.lock_timeout()))
    }

    /// Bounds how long a unit of work waits on a row lock.
    ///
    /// On expiry the waiting statement fails with SQLSTATE `55P03` and the unit
    /// of work rolls back. `None` or a zero duration waits indefinitely.
    /// Non-zero durations below one millisecond round up to one millisecond.
    #[must_use]
    pub fn with_lock_timeout(mut self, lock_timeout: Option<Duration>) -> Self {
        self.lock_timeout = lock_timeout.filter(|timeout| !timeout.is_zero());
        self
    }

    /// The row lock timeout applied to each unit of work, if any.
    #[must_use]
    pub const fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Queries bound to the pool, outside any transaction.
    #[must_use]
    pub const fn queries(&self) -> Queries<'_, DatabaseConnection> {
        Queries::new(&self.db)
    }

    /// Runs `work` inside a single database transaction.
    ///
    /// Commits if `work` succeeds. Otherwise rolls back and returns the error
    /// from `work`; if the rollback fails as well, both errors are returned in
    /// [`StoreError::Rollback`]. Dropping the returned future before it
    /// completes drops the transaction, which rolls it back.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Begin`] or [`StoreError::Commit`] for transaction
    /// control failures, or whatever `work` failed with.
    pub async fn exec_tx<T, F>(&self, work: F) -> Result<T, StoreError>
    where
        T: Send,
        F: for<'c> FnOnce(Queries<'c, DatabaseTransaction>) -> BoxFuture<'c, Result<T, StoreError>>
            + Send,
    {
        let txn = self.db.begin().await.map_err(StoreError::Begin)?;

        let outcome = match self.apply_lock_timeout(&txn).await {
            Ok(()) => work(Queries::new(&txn)).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(value) => {
                txn.commit().await.map_err(StoreError::Commit)?;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "unit of work failed, rolling back");
                let rollback = txn.rollback().await;
                if let Err(rb_err) = &rollback {
                    error!(error = %rb_err, "rollback failed");
                }
                Err(rollback_outcome(err, rollback))
            }
        }
    }

    async fn apply_lock_timeout(&self, txn: &DatabaseTransaction) -> Result<(), StoreError> {
        if let Some(timeout) = self.lock_timeout {
            txn.execute_unprepared(&lock_timeout_sql(timeout)).await?;
        }
        Ok(())
    }
}

/// `SET LOCAL` statement for a non-zero lock timeout.
///
/// Postgres reads `0` as "no timeout", so the value never drops below `1ms`.
fn lock_timeout_sql(timeout: Duration) -> String {
    // SET does not accept bind parameters; the value is an integer we format.
    format!("SET LOCAL lock_timeout = '{}ms'", timeout.as_millis().max(1))
}

/// Combines a failed unit of work with the result of its rollback.
fn rollback_outcome(tx_err: StoreError, rollback: Result<(), DbErr>) -> StoreError {
    match rollback {
        Ok(()) => tx_err,
        Err(rb_err) => StoreError::Rollback {
            tx_err: Box::new(tx_err),
            rb_err,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplebank_shared::types::AccountId;

    #[test]
    fn test_zero_lock_timeout_is_disabled() {
        let store = Store::new(DatabaseConnection::Disconnected);
        assert_eq!(store.lock_timeout(), None);

        let store = store.with_lock_timeout(Some(Duration::ZERO));
        assert_eq!(store.lock_timeout(), None);

        let store = store.with_lock_timeout(Some(Duration::from_millis(250)));
        assert_eq!(store.lock_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_lock_timeout_sql_never_sends_zero() {
        assert_eq!(
            lock_timeout_sql(Duration::from_millis(1500)),
            "SET LOCAL lock_timeout = '1500ms'"
        );
        assert_eq!(
            lock_timeout_sql(Duration::from_micros(200)),
            "SET LOCAL lock_timeout = '1ms'"
        );
    }

    #[test]
    fn test_successful_rollback_returns_original_error() {
        let err = rollback_outcome(StoreError::AccountNotFound(AccountId(3)), Ok(()));
        assert!(matches!(err, StoreError::AccountNotFound(AccountId(3))));
    }

    #[test]
    fn test_failed_rollback_keeps_both_errors() {
        let err = rollback_outcome(
            StoreError::AccountNotFound(AccountId(3)),
            Err(DbErr::Custom("connection closed".into())),
        );

        match err {
            StoreError::Rollback { tx_err, rb_err } => {
                assert!(matches!(*tx_err, StoreError::AccountNotFound(AccountId(3))));
                assert!(rb_err.to_string().contains("connection closed"));
            }
            other => panic!("expected rollback error, got {other:?}"),
        }
    }
}
