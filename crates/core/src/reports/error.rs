//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report generation.
///
/// Every variant is a client input problem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    /// Month outside 1-12.
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    /// Year is not a four-digit year.
    #[error("year must be a four-digit year, got {0}")]
    InvalidYear(i32),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}
