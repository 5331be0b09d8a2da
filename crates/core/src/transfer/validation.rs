//! Business rule validation for transfers.

use simplebank_shared::types::AccountId;
use thiserror::Error;

use super::types::TransferTxParams;

/// Validation errors for transfer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferValidationError {
    /// Amount is zero or negative.
    #[error("Transfer amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    /// Source and destination are the same account.
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountId),

    /// Applying the transfer would overflow the account balance.
    #[error("Balance overflow on account {account_id}: {balance} + {delta}")]
    BalanceOverflow {
        /// Account whose balance would overflow.
        account_id: AccountId,
        /// Balance read under lock.
        balance: i64,
        /// Signed change that was being applied.
        delta: i64,
    },
}

/// Validates transfer parameters before any storage is touched.
///
/// Account existence is not checked here; the store rejects unknown accounts.
///
/// # Errors
///
/// Returns an error if the amount is not positive or both sides name the same account.
pub fn validate_params(params: &TransferTxParams) -> Result<(), TransferValidationError> {
    if params.amount <= 0 {
        return Err(TransferValidationError::NonPositiveAmount(params.amount));
    }

    if params.from_account_id == params.to_account_id {
        return Err(TransferValidationError::SameAccount(params.from_account_id));
    }

    Ok(())
}

/// Computes `balance + delta` for an account balance read under lock.
///
/// # Errors
///
/// Returns [`TransferValidationError::BalanceOverflow`] if the sum does not fit in `i64`.
pub fn apply_delta(
    account_id: AccountId,
    balance: i64,
    delta: i64,
) -> Result<i64, TransferValidationError> {
    balance
        .checked_add(delta)
        .ok_or(TransferValidationError::BalanceOverflow {
            account_id,
            balance,
            delta,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(10)]
    #[case(i64::MAX)]
    fn test_valid_amounts(#[case] amount: i64) {
        let params = TransferTxParams::new(AccountId(1), AccountId(2), amount);
        assert!(validate_params(&params).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn test_non_positive_amounts_rejected(#[case] amount: i64) {
        let params = TransferTxParams::new(AccountId(1), AccountId(2), amount);
        assert_eq!(
            validate_params(&params),
            Err(TransferValidationError::NonPositiveAmount(amount))
        );
    }

    #[test]
    fn test_same_account_rejected() {
        let params = TransferTxParams::new(AccountId(5), AccountId(5), 10);
        assert_eq!(
            validate_params(&params),
            Err(TransferValidationError::SameAccount(AccountId(5)))
        );
    }

    #[test]
    fn test_amount_checked_before_accounts() {
        let params = TransferTxParams::new(AccountId(5), AccountId(5), 0);
        assert_eq!(
            validate_params(&params),
            Err(TransferValidationError::NonPositiveAmount(0))
        );
    }

    #[test]
    fn test_apply_delta() {
        assert_eq!(apply_delta(AccountId(1), 100, -10), Ok(90));
        assert_eq!(apply_delta(AccountId(1), 100, 10), Ok(110));
        assert_eq!(apply_delta(AccountId(1), 0, -10), Ok(-10));
    }

    #[test]
    fn test_apply_delta_overflow() {
        assert_eq!(
            apply_delta(AccountId(3), i64::MAX, 1),
            Err(TransferValidationError::BalanceOverflow {
                account_id: AccountId(3),
                balance: i64::MAX,
                delta: 1,
            })
        );
        assert!(apply_delta(AccountId(3), i64::MIN, -1).is_err());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            TransferValidationError::NonPositiveAmount(-5).to_string(),
            "Transfer amount must be positive, got -5"
        );
        assert_eq!(
            TransferValidationError::SameAccount(AccountId(7)).to_string(),
            "Cannot transfer from account 7 to itself"
        );
    }
}
