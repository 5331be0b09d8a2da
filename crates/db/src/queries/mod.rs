//! Data access for accounts, entries, and transfers.
//!
//! [`Queries`] borrows any `SeaORM` connection: the pool for plain reads, or a
//! [`DatabaseTransaction`](sea_orm::DatabaseTransaction) when the calls must
//! commit or roll back together (see [`Store::exec_tx`](crate::Store::exec_tx)).

pub mod account;
pub mod entry;
pub mod transfer;

pub use account::CreateAccountParams;
pub use entry::CreateEntryParams;
pub use transfer::{CreateTransferParams, ListTransfersFilter};

/// Typed queries bound to one connection or transaction.
#[derive(Debug)]
pub struct Queries<'c, C> {
    db: &'c C,
}

impl<'c, C> Queries<'c, C> {
    /// Binds queries to a connection or transaction.
    #[must_use]
    pub const fn new(db: &'c C) -> Self {
        Self { db }
    }
}

impl<C> Clone for Queries<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Queries<'_, C> {}
