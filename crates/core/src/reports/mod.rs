//! Income/expense report generation.
//!
//! This module provides pure business logic for the two reports:
//! - Monthly summary (income, expense, balance for one calendar month)
//! - Category breakdown (per-category totals and shares over a date range)

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
