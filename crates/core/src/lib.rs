//! Core business logic for SimpleBank.
//!
//! This crate contains pure business logic with ZERO database dependencies.
//! The persistence layer in `simplebank-db` drives these rules inside a
//! database transaction.
//!
//! # Modules
//!
//! - `transfer` - Transfer parameters, validation, and the account lock ordering policy

pub mod transfer;
