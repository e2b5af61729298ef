//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::transaction::TransactionKind;

/// Smallest accepted report year.
pub const MIN_YEAR: i32 = 1000;
/// Largest accepted report year.
pub const MAX_YEAR: i32 = 9999;

/// One transaction as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Income or expense.
    pub kind: TransactionKind,
    /// Category label.
    pub category: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Date the transaction happened.
    pub occurred_on: NaiveDate,
}

/// Inclusive date range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if start is after end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns the range covering the first through last day of a month.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidMonth` for months outside 1-12 and
    /// `ReportError::InvalidYear` for years outside 1000-9999.
    pub fn month(year: i32, month: u32) -> Result<Self, ReportError> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidMonth(month));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ReportError::InvalidYear(year));
        }

        let start =
            NaiveDate::from_ymd_opt(year, month, 1).ok_or(ReportError::InvalidMonth(month))?;
        let next_month_start = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        };
        let end = next_month_start
            .and_then(|d| d.pred_opt())
            .ok_or(ReportError::InvalidYear(year))?;

        Ok(Self { start, end })
    }

    /// First day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns true if the date falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Income, expense, and balance for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Report year.
    pub year: i32,
    /// Report month (1-12).
    pub month: u32,
    /// Sum of income amounts.
    pub income_total: Decimal,
    /// Sum of expense amounts.
    pub expense_total: Decimal,
    /// `income_total - expense_total`.
    pub balance: Decimal,
}

/// Total and share for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Category label.
    pub category: String,
    /// Sum of amounts in this category.
    pub total: Decimal,
    /// Share of the grand total, in percent, two decimal places.
    pub percentage: Decimal,
}

/// Category breakdown over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered.
    pub end_date: NaiveDate,
    /// Sum over all categories.
    pub grand_total: Decimal,
    /// Categories, largest total first, ties by name.
    pub categories: Vec<CategoryTotal>,
}
