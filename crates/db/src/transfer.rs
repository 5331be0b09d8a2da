//! Transfer engine: one funds transfer as one database transaction.

use sea_orm::DatabaseTransaction;
use serde::Serialize;
use simplebank_core::transfer::{
    BalanceChange, Side, TransferTxParams, apply_delta, lock_order, validate_params,
};
use tracing::{Instrument, debug, info, info_span};

use crate::entities::{accounts, entries, transfers};
use crate::error::StoreError;
use crate::queries::{CreateEntryParams, CreateTransferParams, Queries};
use crate::store::Store;

/// Everything a successful transfer wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferTxResult {
    /// The transfer record.
    pub transfer: transfers::Model,
    /// Source account after the debit.
    pub from_account: accounts::Model,
    /// Destination account after the credit.
    pub to_account: accounts::Model,
    /// Debit entry on the source account (`-amount`).
    pub from_entry: entries::Model,
    /// Credit entry on the destination account (`+amount`).
    pub to_entry: entries::Model,
}

impl Store {
    /// Moves `amount` from one account to another.
    ///
    /// Within a single transaction this creates the transfer record, a debit
    /// entry on the source, a credit entry on the destination, and then locks
    /// and updates both balances. The balance rows are locked in ascending
    /// account id order (see [`lock_order`]), so concurrent transfers between
    /// the same two accounts in opposite directions cannot deadlock.
    ///
    /// Either every write commits or none does.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidTransfer`] for a non-positive amount or a
    ///   same-account transfer, before anything is written
    /// - [`StoreError::AccountNotFound`] if an account row is missing
    /// - the first failing step's error otherwise, after rollback
    pub async fn transfer_tx(
        &self,
        params: TransferTxParams,
    ) -> Result<TransferTxResult, StoreError> {
        validate_params(&params)?;

        let span = info_span!(
            "transfer_tx",
            tx_name = params.tx_name.as_deref(),
            from_account_id = %params.from_account_id,
            to_account_id = %params.to_account_id,
            amount = params.amount,
        );

        async move {
            let result = self
                .exec_tx(move |q| Box::pin(async move { run_transfer(q, &params).await }))
                .await?;

            info!(transfer_id = result.transfer.id, "transfer committed");
            Ok(result)
        }
        .instrument(span)
        .await
    }
}

async fn run_transfer(
    q: Queries<'_, DatabaseTransaction>,
    params: &TransferTxParams,
) -> Result<TransferTxResult, StoreError> {
    debug!("create transfer");
    let transfer = q
        .create_transfer(CreateTransferParams {
            from_account_id: params.from_account_id,
            to_account_id: params.to_account_id,
            amount: params.amount,
        })
        .await?;

    debug!(transfer_id = transfer.id, "create debit entry");
    let from_entry = q
        .create_entry(CreateEntryParams {
            account_id: params.from_account_id,
            transfer_id: transfer.transfer_id(),
            amount: -params.amount,
        })
        .await?;

    debug!(transfer_id = transfer.id, "create credit entry");
    let to_entry = q
        .create_entry(CreateEntryParams {
            account_id: params.to_account_id,
            transfer_id: transfer.transfer_id(),
            amount: params.amount,
        })
        .await?;

    let [first, second] = lock_order(params);
    let first_account = lock_and_apply(q, first).await?;
    let second_account = lock_and_apply(q, second).await?;

    let (from_account, to_account) = match first.side {
        Side::From => (first_account, second_account),
        Side::To => (second_account, first_account),
    };

    Ok(TransferTxResult {
        transfer,
        from_account,
        to_account,
        from_entry,
        to_entry,
    })
}

/// Locks one account row, then writes its balance plus `change.delta`.
async fn lock_and_apply(
    q: Queries<'_, DatabaseTransaction>,
    change: BalanceChange,
) -> Result<accounts::Model, StoreError> {
    debug!(account_id = %change.account_id, side = ?change.side, "lock account");
    let account = q
        .get_account_for_update(change.account_id)
        .await?
        .ok_or(StoreError::AccountNotFound(change.account_id))?;

    let balance = apply_delta(change.account_id, account.balance, change.delta)?;

    debug!(
        account_id = %change.account_id,
        previous_balance = account.balance,
        balance,
        "update account balance"
    );
    q.update_account_balance(change.account_id, balance).await
}
