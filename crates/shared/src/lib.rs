//! Shared types and configuration for SimpleBank.
//!
//! This crate provides common types used across all other crates:
//! - Typed integer IDs for accounts, entries, and transfers
//! - Pagination types for list queries
//! - Configuration management

pub mod config;
pub mod types;

pub use config::AppConfig;
