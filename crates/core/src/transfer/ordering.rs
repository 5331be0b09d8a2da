//! Account lock ordering for transfers.
//!
//! Two transfers running in opposite directions between the same pair of
//! accounts (A to B and B to A) deadlock if each locks its own source first:
//! one holds A and waits for B while the other holds B and waits for A.
//!
//! Every transfer therefore locks its two accounts in ascending id order,
//! whatever the direction. All transactions agree on the relative order of any
//! two rows, so no wait cycle can form between them.

use super::types::{BalanceChange, Side, TransferTxParams};

/// Returns the two balance changes of a transfer in lock acquisition order.
///
/// The account with the lower id comes first. Each change keeps its logical
/// side, so the source is always debited and the destination credited
/// regardless of which one is locked first.
///
/// Callers must reject same-account transfers beforehand; for equal ids the
/// source is returned first.
#[must_use]
pub fn lock_order(params: &TransferTxParams) -> [BalanceChange; 2] {
    let debit = BalanceChange {
        side: Side::From,
        account_id: params.from_account_id,
        delta: -params.amount,
    };
    let credit = BalanceChange {
        side: Side::To,
        account_id: params.to_account_id,
        delta: params.amount,
    };

    if params.from_account_id <= params.to_account_id {
        [debit, credit]
    } else {
        [credit, debit]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplebank_shared::types::AccountId;

    #[test]
    fn test_lower_source_locked_first() {
        let params = TransferTxParams::new(AccountId(1), AccountId(2), 10);
        let [first, second] = lock_order(&params);

        assert_eq!(first.account_id, AccountId(1));
        assert_eq!(first.side, Side::From);
        assert_eq!(first.delta, -10);

        assert_eq!(second.account_id, AccountId(2));
        assert_eq!(second.side, Side::To);
        assert_eq!(second.delta, 10);
    }

    #[test]
    fn test_lower_destination_locked_first() {
        let params = TransferTxParams::new(AccountId(2), AccountId(1), 10);
        let [first, second] = lock_order(&params);

        assert_eq!(first.account_id, AccountId(1));
        assert_eq!(first.side, Side::To);
        assert_eq!(first.delta, 10);

        assert_eq!(second.account_id, AccountId(2));
        assert_eq!(second.side, Side::From);
        assert_eq!(second.delta, -10);
    }

    #[test]
    fn test_opposite_directions_share_lock_order() {
        let forward = TransferTxParams::new(AccountId(40), AccountId(7), 25);
        let backward = TransferTxParams::new(AccountId(7), AccountId(40), 25);

        let forward_ids = lock_order(&forward).map(|c| c.account_id);
        let backward_ids = lock_order(&backward).map(|c| c.account_id);

        assert_eq!(forward_ids, backward_ids);
        assert_eq!(forward_ids, [AccountId(7), AccountId(40)]);
    }
}
