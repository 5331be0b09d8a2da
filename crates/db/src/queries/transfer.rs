//! Transfer record queries.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use simplebank_shared::types::{AccountId, PageRequest, PageResponse, TransferId};

use super::Queries;
use crate::entities::transfers;
use crate::error::StoreError;

/// Input for creating a transfer record.
#[derive(Debug, Clone, Copy)]
pub struct CreateTransferParams {
    /// Debited account.
    pub from_account_id: AccountId,
    /// Credited account.
    pub to_account_id: AccountId,
    /// Positive amount.
    pub amount: i64,
}

/// Filter options for listing transfers.
///
/// A transfer matches if it leaves `from_account_id` OR arrives at
/// `to_account_id`. With neither set, all transfers match.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListTransfersFilter {
    /// Match transfers debiting this account.
    pub from_account_id: Option<AccountId>,
    /// Match transfers crediting this account.
    pub to_account_id: Option<AccountId>,
}

impl ListTransfersFilter {
    fn condition(self) -> Option<Condition> {
        let mut condition = Condition::any();
        let mut any = false;

        if let Some(from) = self.from_account_id {
            condition = condition.add(transfers::Column::FromAccountId.eq(from.0));
            any = true;
        }
        if let Some(to) = self.to_account_id {
            condition = condition.add(transfers::Column::ToAccountId.eq(to.0));
            any = true;
        }

        any.then_some(condition)
    }
}

impl<C: ConnectionTrait> Queries<'_, C> {
    /// Creates a transfer record.
    ///
    /// This only records the transfer; balances and entries are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (unknown account, non-positive amount).
    pub async fn create_transfer(
        &self,
        input: CreateTransferParams,
    ) -> Result<transfers::Model, StoreError> {
        let transfer = transfers::ActiveModel {
            from_account_id: Set(input.from_account_id.0),
            to_account_id: Set(input.to_account_id.0),
            amount: Set(input.amount),
            ..Default::default()
        };

        Ok(transfer.insert(self.db).await?)
    }

    /// Gets a transfer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_transfer(
        &self,
        id: TransferId,
    ) -> Result<Option<transfers::Model>, StoreError> {
        Ok(transfers::Entity::find_by_id(id.0).one(self.db).await?)
    }

    /// Lists transfers matching the filter, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transfers(
        &self,
        filter: ListTransfersFilter,
        page: PageRequest,
    ) -> Result<PageResponse<transfers::Model>, StoreError> {
        let mut query = transfers::Entity::find();
        if let Some(condition) = filter.condition() {
            query = query.filter(condition);
        }

        let total = query.clone().count(self.db).await?;

        let transfers = query
            .order_by_asc(transfers::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db)
            .await?;

        Ok(PageResponse::new(transfers, page.page, page.per_page, total))
    }
}
