//! Property-based tests for transfer lock ordering and validation.

use proptest::prelude::*;
use simplebank_shared::types::AccountId;

use super::ordering::lock_order;
use super::types::{Side, TransferTxParams};
use super::validation::{validate_params, TransferValidationError};

/// Strategy to generate a pair of distinct account ids.
fn distinct_accounts() -> impl Strategy<Value = (AccountId, AccountId)> {
    (1i64..1_000_000, 1i64..1_000_000)
        .prop_filter("accounts must differ", |(a, b)| a != b)
        .prop_map(|(a, b)| (AccountId(a), AccountId(b)))
}

/// Strategy to generate a valid positive amount.
fn positive_amount() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Locks are always taken in strictly ascending account id order.
    #[test]
    fn prop_lock_order_is_ascending(
        (from, to) in distinct_accounts(),
        amount in positive_amount(),
    ) {
        let [first, second] = lock_order(&TransferTxParams::new(from, to, amount));
        prop_assert!(first.account_id < second.account_id);
    }

    /// Reversing the direction of a transfer does not change which row is locked first.
    #[test]
    fn prop_lock_order_direction_independent(
        (a, b) in distinct_accounts(),
        amount in positive_amount(),
    ) {
        let forward = lock_order(&TransferTxParams::new(a, b, amount)).map(|c| c.account_id);
        let backward = lock_order(&TransferTxParams::new(b, a, amount)).map(|c| c.account_id);
        prop_assert_eq!(forward, backward);
    }

    /// The source is debited and the destination credited by exactly `amount`.
    #[test]
    fn prop_deltas_match_logical_sides(
        (from, to) in distinct_accounts(),
        amount in positive_amount(),
    ) {
        let params = TransferTxParams::new(from, to, amount);
        let changes = lock_order(&params);

        let total: i64 = changes.iter().map(|c| c.delta).sum();
        prop_assert_eq!(total, 0);

        for change in changes {
            prop_assert_eq!(change.account_id, params.account(change.side));
            match change.side {
                Side::From => prop_assert_eq!(change.delta, -amount),
                Side::To => prop_assert_eq!(change.delta, amount),
            }
        }
    }

    /// Zero and negative amounts never validate.
    #[test]
    fn prop_non_positive_amount_rejected(
        (from, to) in distinct_accounts(),
        amount in i64::MIN..=0,
    ) {
        let result = validate_params(&TransferTxParams::new(from, to, amount));
        prop_assert_eq!(result, Err(TransferValidationError::NonPositiveAmount(amount)));
    }

    /// A transfer to the same account never validates.
    #[test]
    fn prop_same_account_rejected(
        id in 1i64..1_000_000,
        amount in positive_amount(),
    ) {
        let result = validate_params(&TransferTxParams::new(AccountId(id), AccountId(id), amount));
        prop_assert_eq!(result, Err(TransferValidationError::SameAccount(AccountId(id))));
    }
}
