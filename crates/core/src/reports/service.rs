//! Report generation service.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use super::error::ReportError;
use super::types::{CategoryBreakdown, CategoryTotal, DateRange, MonthlySummary, ReportEntry};
use crate::transaction::TransactionKind;

/// Decimal places kept on category percentages.
const PERCENTAGE_SCALE: u32 = 2;

/// Service for generating income/expense reports.
pub struct ReportService;

impl ReportService {
    /// Sums income and expense for one calendar month.
    ///
    /// Entries outside the month are ignored, so callers may pass a wider set.
    /// A month with no entries yields all-zero totals.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidMonth` / `ReportError::InvalidYear` for
    /// out-of-range input.
    pub fn monthly_summary(
        entries: &[ReportEntry],
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary, ReportError> {
        let range = DateRange::month(year, month)?;

        let mut income_total = Decimal::ZERO;
        let mut expense_total = Decimal::ZERO;
        for entry in entries.iter().filter(|e| range.contains(e.occurred_on)) {
            match entry.kind {
                TransactionKind::Income => income_total += entry.amount,
                TransactionKind::Expense => expense_total += entry.amount,
            }
        }

        Ok(MonthlySummary {
            year,
            month,
            income_total,
            expense_total,
            balance: income_total - expense_total,
        })
    }

    /// Groups entries in an inclusive date range by category.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidDateRange` if `start > end`.
    pub fn category_breakdown(
        entries: &[ReportEntry],
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> Result<CategoryBreakdown, ReportError> {
        let range = DateRange::new(start, end)?;
        Ok(Self::category_breakdown_in(entries, range))
    }

    /// Groups entries in an already validated range by category.
    #[must_use]
    pub fn category_breakdown_in(entries: &[ReportEntry], range: DateRange) -> CategoryBreakdown {
        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for entry in entries.iter().filter(|e| range.contains(e.occurred_on)) {
            *totals.entry(entry.category.as_str()).or_default() += entry.amount;
        }

        let grand_total: Decimal = totals.values().copied().sum();

        let mut categories: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category: category.to_string(),
                total,
                percentage: percentage_of(total, grand_total),
            })
            .collect();
        categories.sort_by(compare_categories);

        CategoryBreakdown {
            start_date: range.start(),
            end_date: range.end(),
            grand_total,
            categories,
        }
    }
}

/// Largest total first; equal totals by category name ascending.
fn compare_categories(a: &CategoryTotal, b: &CategoryTotal) -> Ordering {
    b.total
        .cmp(&a.total)
        .then_with(|| a.category.cmp(&b.category))
}

/// `part / whole * 100` with exactly two decimal places, or `0.00` when
/// `whole` is zero.
fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::new(0, PERCENTAGE_SCALE);
    }
    let mut percentage = (part * Decimal::ONE_HUNDRED / whole)
        .round_dp_with_strategy(PERCENTAGE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    percentage.rescale(PERCENTAGE_SCALE);
    percentage
}
