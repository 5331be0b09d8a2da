//! Database layer for SimpleBank.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for accounts, entries, and transfers
//! - [`Queries`], typed data access bound to a connection or a transaction
//! - [`Store`], the unit-of-work wrapper and the transfer engine
//! - Database migrations

pub mod entities;
pub mod error;
pub mod migration;
pub mod queries;
pub mod store;
pub mod transfer;

pub use error::StoreError;
pub use queries::{
    CreateAccountParams, CreateEntryParams, CreateTransferParams, ListTransfersFilter, Queries,
};
pub use simplebank_core::transfer::TransferTxParams;
pub use store::Store;
pub use transfer::TransferTxResult;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use simplebank_shared::config::DatabaseConfig;

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the configured pool settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout())
        .acquire_timeout(config.acquire_timeout())
        .sqlx_logging(config.sqlx_logging);

    Database::connect(options).await
}
