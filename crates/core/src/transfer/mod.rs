//! Funds transfer rules.
//!
//! A transfer debits one account and credits another by the same amount. The
//! rules here are storage agnostic:
//! - Parameter validation (positive amount, distinct accounts)
//! - Checked balance arithmetic
//! - The order in which the two account rows must be locked

pub mod ordering;
pub mod types;
pub mod validation;

#[cfg(test)]
mod ordering_props;

pub use ordering::lock_order;
pub use types::{BalanceChange, Side, TransferTxParams};
pub use validation::{TransferValidationError, apply_delta, validate_params};
