//! Core business logic for Fintrack.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `auth` - Password hashing and verification
//! - `transaction` - Income/expense classification and amount rules
//! - `reports` - Monthly summaries and category breakdowns

pub mod auth;
pub mod reports;
pub mod transaction;

pub use transaction::TransactionKind;
