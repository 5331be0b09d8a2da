//! Domain types for transfers.

use serde::{Deserialize, Serialize};
use simplebank_shared::types::AccountId;

/// Input for a single funds transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxParams {
    /// Account debited by the transfer.
    pub from_account_id: AccountId,
    /// Account credited by the transfer.
    pub to_account_id: AccountId,
    /// Amount in minor currency units. Must be positive.
    pub amount: i64,
    /// Optional label attached to the transfer's tracing span.
    #[serde(skip)]
    pub tx_name: Option<String>,
}

impl TransferTxParams {
    /// Creates transfer parameters without a diagnostic label.
    #[must_use]
    pub const fn new(from_account_id: AccountId, to_account_id: AccountId, amount: i64) -> Self {
        Self {
            from_account_id,
            to_account_id,
            amount,
            tx_name: None,
        }
    }

    /// Attaches a diagnostic label, reported on every log line of the transfer.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.tx_name = Some(name.into());
        self
    }

    /// Returns the account on the given side of the transfer.
    #[must_use]
    pub const fn account(&self, side: Side) -> AccountId {
        match side {
            Side::From => self.from_account_id,
            Side::To => self.to_account_id,
        }
    }
}

/// Logical side of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The debited (source) account.
    From,
    /// The credited (destination) account.
    To,
}

/// A pending balance mutation on one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChange {
    /// Which side of the transfer this account plays.
    pub side: Side,
    /// The account to lock and update.
    pub account_id: AccountId,
    /// Signed amount added to the current balance.
    pub delta: i64,
}
