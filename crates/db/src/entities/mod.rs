//! `SeaORM` entity definitions.

pub mod accounts;
pub mod entries;
pub mod transfers;
