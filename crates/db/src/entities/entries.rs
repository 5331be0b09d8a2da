//! `SeaORM` Entity for entries table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use simplebank_shared::types::{AccountId, EntryId, TransferId};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub transfer_id: i64,
    /// Negative for debits, positive for credits.
    pub amount: i64,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Typed id of this entry.
    #[must_use]
    pub const fn entry_id(&self) -> EntryId {
        EntryId(self.id)
    }

    /// Typed id of the owning account.
    #[must_use]
    pub const fn account_id(&self) -> AccountId {
        AccountId(self.account_id)
    }

    /// Typed id of the transfer that produced this entry.
    #[must_use]
    pub const fn transfer_id(&self) -> TransferId {
        TransferId(self.transfer_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
    #[sea_orm(
        belongs_to = "super::transfers::Entity",
        from = "Column::TransferId",
        to = "super::transfers::Column::Id"
    )]
    Transfers,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::transfers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transfers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
