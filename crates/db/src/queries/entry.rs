//! Ledger entry queries.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use simplebank_shared::types::{AccountId, EntryId, PageRequest, PageResponse, TransferId};

use super::Queries;
use crate::entities::entries;
use crate::error::StoreError;

/// Input for creating a ledger entry.
#[derive(Debug, Clone, Copy)]
pub struct CreateEntryParams {
    /// Account the entry is posted to.
    pub account_id: AccountId,
    /// Transfer the entry belongs to.
    pub transfer_id: TransferId,
    /// Signed amount: negative debits, positive credits.
    pub amount: i64,
}

impl<C: ConnectionTrait> Queries<'_, C> {
    /// Creates a ledger entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (unknown account or transfer, zero amount).
    pub async fn create_entry(
        &self,
        input: CreateEntryParams,
    ) -> Result<entries::Model, StoreError> {
        let entry = entries::ActiveModel {
            account_id: Set(input.account_id.0),
            transfer_id: Set(input.transfer_id.0),
            amount: Set(input.amount),
            ..Default::default()
        };

        Ok(entry.insert(self.db).await?)
    }

    /// Gets an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_entry(&self, id: EntryId) -> Result<Option<entries::Model>, StoreError> {
        Ok(entries::Entity::find_by_id(id.0).one(self.db).await?)
    }

    /// Lists an account's entries, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> Result<PageResponse<entries::Model>, StoreError> {
        let query = entries::Entity::find().filter(entries::Column::AccountId.eq(account_id.0));

        let total = query.clone().count(self.db).await?;

        let entries = query
            .order_by_asc(entries::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db)
            .await?;

        Ok(PageResponse::new(entries, page.page, page.per_page, total))
    }

    /// Lists the entries posted by one transfer.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_transfer_entries(
        &self,
        transfer_id: TransferId,
    ) -> Result<Vec<entries::Model>, StoreError> {
        Ok(entries::Entity::find()
            .filter(entries::Column::TransferId.eq(transfer_id.0))
            .order_by_asc(entries::Column::Id)
            .all(self.db)
            .await?)
    }
}
