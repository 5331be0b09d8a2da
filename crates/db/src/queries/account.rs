//! Account queries.

use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};
use simplebank_shared::types::{AccountId, PageRequest, PageResponse};

use super::Queries;
use crate::entities::accounts;
use crate::error::StoreError;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountParams {
    /// Account holder.
    pub owner: String,
    /// Opening balance in minor currency units.
    pub balance: i64,
    /// ISO currency code.
    pub currency: String,
}

impl<C: ConnectionTrait> Queries<'_, C> {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_account(
        &self,
        input: CreateAccountParams,
    ) -> Result<accounts::Model, StoreError> {
        let account = accounts::ActiveModel {
            owner: Set(input.owner),
            balance: Set(input.balance),
            currency: Set(input.currency),
            ..Default::default()
        };

        Ok(account.insert(self.db).await?)
    }

    /// Gets an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_account(&self, id: AccountId) -> Result<Option<accounts::Model>, StoreError> {
        Ok(accounts::Entity::find_by_id(id.0).one(self.db).await?)
    }

    /// Gets an account by ID with `SELECT ... FOR NO KEY UPDATE`.
    ///
    /// The row lock excludes every other writer and locker of the row except
    /// `FOR KEY SHARE`, which foreign key checks take when entries and
    /// transfers referencing the account are inserted. `FOR UPDATE` would
    /// conflict with those and deadlock two transfers that both inserted their
    /// records before locking balances.
    ///
    /// The lock is held until the enclosing transaction ends. Outside a
    /// transaction it is released as soon as the statement completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails, including lock timeouts.
    pub async fn get_account_for_update(
        &self,
        id: AccountId,
    ) -> Result<Option<accounts::Model>, StoreError> {
        Ok(accounts::Entity::find_by_id(id.0)
            .lock(LockType::NoKeyUpdate)
            .one(self.db)
            .await?)
    }

    /// Lists accounts ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(
        &self,
        page: PageRequest,
    ) -> Result<PageResponse<accounts::Model>, StoreError> {
        let total = accounts::Entity::find().count(self.db).await?;

        let accounts = accounts::Entity::find()
            .order_by_asc(accounts::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db)
            .await?;

        Ok(PageResponse::new(accounts, page.page, page.per_page, total))
    }

    /// Overwrites an account balance.
    ///
    /// Callers read the current balance with [`Self::get_account_for_update`]
    /// in the same transaction first; this is never a blind increment.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AccountNotFound`] if no row was updated, or a
    /// database error.
    pub async fn update_account_balance(
        &self,
        id: AccountId,
        balance: i64,
    ) -> Result<accounts::Model, StoreError> {
        let account = accounts::ActiveModel {
            id: Set(id.0),
            balance: Set(balance),
            ..Default::default()
        };

        account.update(self.db).await.map_err(|err| match err {
            DbErr::RecordNotUpdated => StoreError::AccountNotFound(id),
            other => StoreError::Database(other),
        })
    }

    /// Deletes an account. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails, e.g. the account still has entries.
    pub async fn delete_account(&self, id: AccountId) -> Result<bool, StoreError> {
        let result = accounts::Entity::delete_by_id(id.0).exec(self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
