//! Tests for the report aggregator.

use chrono::NaiveDate;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::ReportError;
use super::service::ReportService;
use super::types::{DateRange, ReportEntry};
use crate::transaction::TransactionKind;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn entry(kind: TransactionKind, category: &str, amount: Decimal, on: NaiveDate) -> ReportEntry {
    ReportEntry {
        kind,
        category: category.to_string(),
        amount,
        occurred_on: on,
    }
}

// ============================================================================
// DateRange
// ============================================================================

#[rstest]
#[case(2024, 1, date(2024, 1, 1), date(2024, 1, 31))]
#[case(2024, 2, date(2024, 2, 1), date(2024, 2, 29))]
#[case(2023, 2, date(2023, 2, 1), date(2023, 2, 28))]
#[case(2024, 4, date(2024, 4, 1), date(2024, 4, 30))]
#[case(2024, 12, date(2024, 12, 1), date(2024, 12, 31))]
fn test_month_bounds(
    #[case] year: i32,
    #[case] month: u32,
    #[case] start: NaiveDate,
    #[case] end: NaiveDate,
) {
    let range = DateRange::month(year, month).unwrap();
    assert_eq!(range.start(), start);
    assert_eq!(range.end(), end);
}

#[rstest]
#[case(0)]
#[case(13)]
#[case(99)]
fn test_month_out_of_range(#[case] month: u32) {
    assert_eq!(
        DateRange::month(2024, month),
        Err(ReportError::InvalidMonth(month))
    );
}

#[rstest]
#[case(999)]
#[case(10000)]
#[case(-2024)]
fn test_year_not_four_digits(#[case] year: i32) {
    assert_eq!(DateRange::month(year, 1), Err(ReportError::InvalidYear(year)));
}

#[test]
fn test_date_range_rejects_reversed_bounds() {
    let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
    assert_eq!(
        err,
        ReportError::InvalidDateRange {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1),
        }
    );
}

#[test]
fn test_single_day_range_is_inclusive() {
    let range = DateRange::new(date(2024, 3, 5), date(2024, 3, 5)).unwrap();
    assert!(range.contains(date(2024, 3, 5)));
    assert!(!range.contains(date(2024, 3, 4)));
    assert!(!range.contains(date(2024, 3, 6)));
}

// ============================================================================
// Monthly summary
// ============================================================================

#[test]
fn test_monthly_summary_example() {
    let entries = vec![
        entry(TransactionKind::Income, "salary", dec!(100), date(2024, 1, 5)),
        entry(TransactionKind::Expense, "food", dec!(40), date(2024, 1, 10)),
    ];

    let summary = ReportService::monthly_summary(&entries, 2024, 1).unwrap();

    assert_eq!(summary.income_total, dec!(100));
    assert_eq!(summary.expense_total, dec!(40));
    assert_eq!(summary.balance, dec!(60));
    assert_eq!((summary.year, summary.month), (2024, 1));
}

#[test]
fn test_monthly_summary_ignores_other_months() {
    let entries = vec![
        entry(TransactionKind::Income, "salary", dec!(100), date(2023, 12, 31)),
        entry(TransactionKind::Income, "salary", dec!(250), date(2024, 1, 1)),
        entry(TransactionKind::Expense, "rent", dec!(90.25), date(2024, 1, 31)),
        entry(TransactionKind::Expense, "rent", dec!(90), date(2024, 2, 1)),
    ];

    let summary = ReportService::monthly_summary(&entries, 2024, 1).unwrap();

    assert_eq!(summary.income_total, dec!(250));
    assert_eq!(summary.expense_total, dec!(90.25));
    assert_eq!(summary.balance, dec!(159.75));
}

#[test]
fn test_monthly_summary_empty_month_is_zero() {
    let summary = ReportService::monthly_summary(&[], 2025, 9).unwrap();

    assert_eq!(summary.income_total, Decimal::ZERO);
    assert_eq!(summary.expense_total, Decimal::ZERO);
    assert_eq!(summary.balance, Decimal::ZERO);
}

#[test]
fn test_monthly_summary_negative_balance() {
    let entries = vec![
        entry(TransactionKind::Income, "gift", dec!(10), date(2024, 6, 1)),
        entry(TransactionKind::Expense, "travel", dec!(35.5), date(2024, 6, 2)),
    ];

    let summary = ReportService::monthly_summary(&entries, 2024, 6).unwrap();

    assert_eq!(summary.balance, dec!(-25.5));
}

#[test]
fn test_monthly_summary_rejects_bad_month() {
    assert_eq!(
        ReportService::monthly_summary(&[], 2024, 13),
        Err(ReportError::InvalidMonth(13))
    );
}

// ============================================================================
// Category breakdown
// ============================================================================

#[test]
fn test_category_breakdown_tie_ordered_by_name() {
    let on = date(2024, 1, 15);
    let entries = vec![
        entry(TransactionKind::Expense, "food", dec!(30), on),
        entry(TransactionKind::Expense, "food", dec!(20), on),
        entry(TransactionKind::Expense, "rent", dec!(50), on),
    ];

    let breakdown =
        ReportService::category_breakdown(&entries, date(2024, 1, 1), date(2024, 1, 31)).unwrap();

    let rows: Vec<_> = breakdown
        .categories
        .iter()
        .map(|c| (c.category.as_str(), c.total, c.percentage))
        .collect();
    assert_eq!(
        rows,
        vec![("food", dec!(50), dec!(50.00)), ("rent", dec!(50), dec!(50.00))]
    );
    assert_eq!(breakdown.grand_total, dec!(100));
    assert_eq!(breakdown.categories[0].percentage.to_string(), "50.00");
}

#[test]
fn test_category_breakdown_orders_by_total_desc() {
    let on = date(2024, 5, 2);
    let entries = vec![
        entry(TransactionKind::Expense, "coffee", dec!(5), on),
        entry(TransactionKind::Expense, "rent", dec!(1200), on),
        entry(TransactionKind::Income, "salary", dec!(3000), on),
        entry(TransactionKind::Expense, "groceries", dec!(300), on),
    ];

    let breakdown =
        ReportService::category_breakdown(&entries, date(2024, 5, 1), date(2024, 5, 31)).unwrap();

    let names: Vec<_> = breakdown
        .categories
        .iter()
        .map(|c| c.category.as_str())
        .collect();
    assert_eq!(names, vec!["salary", "rent", "groceries", "coffee"]);
}

#[test]
fn test_category_breakdown_rounds_percentages() {
    let on = date(2024, 1, 1);
    let entries = vec![
        entry(TransactionKind::Expense, "a", dec!(1), on),
        entry(TransactionKind::Expense, "b", dec!(1), on),
        entry(TransactionKind::Expense, "c", dec!(1), on),
    ];

    let breakdown = ReportService::category_breakdown(&entries, on, on).unwrap();

    for category in &breakdown.categories {
        assert_eq!(category.percentage, dec!(33.33));
    }
}

#[test]
fn test_category_breakdown_range_is_inclusive() {
    let entries = vec![
        entry(TransactionKind::Expense, "food", dec!(10), date(2024, 1, 1)),
        entry(TransactionKind::Expense, "food", dec!(10), date(2024, 1, 31)),
        entry(TransactionKind::Expense, "food", dec!(10), date(2024, 2, 1)),
    ];

    let breakdown =
        ReportService::category_breakdown(&entries, date(2024, 1, 1), date(2024, 1, 31)).unwrap();

    assert_eq!(breakdown.categories.len(), 1);
    assert_eq!(breakdown.categories[0].total, dec!(20));
}

#[test]
fn test_category_breakdown_empty_range() {
    let breakdown =
        ReportService::category_breakdown(&[], date(2024, 1, 1), date(2024, 1, 31)).unwrap();

    assert!(breakdown.categories.is_empty());
    assert_eq!(breakdown.grand_total, Decimal::ZERO);
    assert_eq!(breakdown.start_date, date(2024, 1, 1));
    assert_eq!(breakdown.end_date, date(2024, 1, 31));
}

#[test]
fn test_category_breakdown_rejects_reversed_range() {
    let result = ReportService::category_breakdown(&[], date(2024, 2, 1), date(2024, 1, 1));
    assert!(matches!(result, Err(ReportError::InvalidDateRange { .. })));
}

// ============================================================================
// Properties
// ============================================================================

fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![Just(TransactionKind::Income), Just(TransactionKind::Expense)]
}

/// Positive amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn entry_strategy() -> impl Strategy<Value = ReportEntry> {
    (
        kind_strategy(),
        prop::sample::select(vec!["food", "rent", "salary", "travel", "misc"]),
        amount_strategy(),
        1u32..=28,
        1u32..=3,
    )
        .prop_map(|(kind, category, amount, day, month)| {
            entry(kind, category, amount, date(2024, month, day))
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Balance always equals income minus expense.
    #[test]
    fn prop_balance_is_income_minus_expense(
        entries in prop::collection::vec(entry_strategy(), 0..50),
        month in 1u32..=3,
    ) {
        let summary = ReportService::monthly_summary(&entries, 2024, month).unwrap();
        prop_assert_eq!(summary.balance, summary.income_total - summary.expense_total);
    }

    /// A month with no entries is all zeros.
    #[test]
    fn prop_month_without_entries_is_zero(
        entries in prop::collection::vec(entry_strategy(), 0..50),
        month in 4u32..=12,
    ) {
        let summary = ReportService::monthly_summary(&entries, 2024, month).unwrap();
        prop_assert_eq!(summary.income_total, Decimal::ZERO);
        prop_assert_eq!(summary.expense_total, Decimal::ZERO);
        prop_assert_eq!(summary.balance, Decimal::ZERO);
    }

    /// Percentages sum to 100 within rounding error.
    #[test]
    fn prop_percentages_sum_to_hundred(
        entries in prop::collection::vec(entry_strategy(), 1..50),
    ) {
        let breakdown = ReportService::category_breakdown(
            &entries,
            date(2024, 1, 1),
            date(2024, 3, 31),
        ).unwrap();

        let sum: Decimal = breakdown.categories.iter().map(|c| c.percentage).sum();
        // Each row rounds to 0.01, so the error is bounded by 0.005 per row.
        let epsilon = dec!(0.005) * Decimal::from(breakdown.categories.len());
        prop_assert!((sum - Decimal::ONE_HUNDRED).abs() <= epsilon, "sum was {}", sum);
    }

    /// Category totals add up to the grand total and ordering is deterministic.
    #[test]
    fn prop_breakdown_totals_and_order(
        entries in prop::collection::vec(entry_strategy(), 0..50),
    ) {
        let breakdown = ReportService::category_breakdown(
            &entries,
            date(2024, 1, 1),
            date(2024, 3, 31),
        ).unwrap();

        let expected: Decimal = entries.iter().map(|e| e.amount).sum();
        let sum: Decimal = breakdown.categories.iter().map(|c| c.total).sum();
        prop_assert_eq!(sum, expected);
        prop_assert_eq!(breakdown.grand_total, expected);

        for pair in breakdown.categories.windows(2) {
            let ordered = pair[0].total > pair[1].total
                || (pair[0].total == pair[1].total && pair[0].category < pair[1].category);
            prop_assert!(ordered, "{:?} before {:?}", pair[0], pair[1]);
        }
    }
}
