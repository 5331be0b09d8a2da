//! Error types for store operations.

use sea_orm::{DbErr, RuntimeErr};
use simplebank_core::transfer::TransferValidationError;
use simplebank_shared::types::AccountId;

/// SQLSTATE `serialization_failure`.
const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE `deadlock_detected`.
const DEADLOCK_DETECTED: &str = "40P01";
/// SQLSTATE `lock_not_available`, raised when `lock_timeout` expires.
const LOCK_NOT_AVAILABLE: &str = "55P03";

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database transaction could not be opened.
    #[error("Failed to begin transaction: {0}")]
    Begin(#[source] DbErr),

    /// The database transaction could not be committed.
    #[error("Failed to commit transaction: {0}")]
    Commit(#[source] DbErr),

    /// A step failed and the rollback that followed failed as well.
    #[error("tx err: {tx_err}, rb err: {rb_err}")]
    Rollback {
        /// The error that aborted the unit of work.
        #[source]
        tx_err: Box<StoreError>,
        /// The error returned by the rollback.
        rb_err: DbErr,
    },

    /// Transfer parameters or resulting balances violate a business rule.
    #[error(transparent)]
    InvalidTransfer(#[from] TransferValidationError),

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    /// Returns the PostgreSQL SQLSTATE code behind this error, if any.
    ///
    /// For [`StoreError::Rollback`] the code of the original failure is reported.
    #[must_use]
    pub fn sqlstate(&self) -> Option<String> {
        match self {
            Self::Begin(err) | Self::Commit(err) | Self::Database(err) => db_sqlstate(err),
            Self::Rollback { tx_err, .. } => tx_err.sqlstate(),
            Self::InvalidTransfer(_) | Self::AccountNotFound(_) => None,
        }
    }

    /// Whether re-running the whole operation may succeed.
    ///
    /// True for deadlocks, serialization failures, and lock timeouts. The store
    /// itself never retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.sqlstate().as_deref(),
            Some(SERIALIZATION_FAILURE | DEADLOCK_DETECTED | LOCK_NOT_AVAILABLE)
        )
    }
}

fn db_sqlstate(err: &DbErr) -> Option<String> {
    match err {
        DbErr::Conn(RuntimeErr::SqlxError(err))
        | DbErr::Exec(RuntimeErr::SqlxError(err))
        | DbErr::Query(RuntimeErr::SqlxError(err)) => sqlx_sqlstate(err),
        _ => None,
    }
}

fn sqlx_sqlstate(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(sqlx::error::DatabaseError::code)
        .map(std::borrow::Cow::into_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rollback_error_display_keeps_both_causes() {
        let err = StoreError::Rollback {
            tx_err: Box::new(StoreError::AccountNotFound(AccountId(9))),
            rb_err: DbErr::Custom("connection reset".into()),
        };

        let message = err.to_string();
        assert!(message.contains("Account not found: 9"));
        assert!(message.contains("connection reset"));
    }

    #[test]
    fn test_rollback_error_source_is_original() {
        use std::error::Error as _;

        let err = StoreError::Rollback {
            tx_err: Box::new(StoreError::AccountNotFound(AccountId(1))),
            rb_err: DbErr::Custom("boom".into()),
        };

        let source = err.source().expect("rollback error should have a source");
        assert_eq!(source.to_string(), "Account not found: 1");
    }

    #[test]
    fn test_invalid_transfer_is_transparent() {
        let err = StoreError::from(TransferValidationError::SameAccount(AccountId(4)));
        assert_eq!(err.to_string(), "Cannot transfer from account 4 to itself");
    }

    #[test]
    fn test_non_sql_errors_have_no_sqlstate() {
        assert!(StoreError::AccountNotFound(AccountId(1)).sqlstate().is_none());
        assert!(
            StoreError::Database(DbErr::Custom("x".into()))
                .sqlstate()
                .is_none()
        );
        assert!(!StoreError::Begin(DbErr::Custom("x".into())).is_retryable());
    }
}
