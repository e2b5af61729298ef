//! Report routes: monthly summary and category breakdown.

use axum::{Json, Router, extract::State, routing::get};
use chrono::{Datelike, NaiveDate, Utc};
use fintrack_core::TransactionKind;
use fintrack_core::reports::{CategoryTotal, DateRange, MonthlySummary};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{AppState, error::ApiError, extractors::ValidatedQuery, middleware::AuthUser};
use fintrack_db::ReportRepository;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/monthly", get(get_monthly_summary))
        .route("/reports/category-breakdown", get(get_category_breakdown))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the monthly summary.
#[derive(Debug, Deserialize, Validate)]
pub struct MonthlyQuery {
    /// Four-digit year, current year if omitted.
    pub year: Option<i32>,
    /// Month 1-12, current month if omitted.
    pub month: Option<u32>,
}

/// Query parameters for the category breakdown.
///
/// Either give both `start_date` and `end_date`, or neither and the range
/// is the month from `year`/`month`.
#[derive(Debug, Deserialize, Validate)]
pub struct BreakdownQuery {
    /// Inclusive start date (YYYY-MM-DD).
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD).
    pub end_date: Option<NaiveDate>,
    /// Year used when no dates are given.
    pub year: Option<i32>,
    /// Month used when no dates are given.
    pub month: Option<u32>,
    /// Restrict to income or expense.
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
}

/// Category breakdown response.
#[derive(Debug, Serialize)]
pub struct CategoryBreakdownResponse {
    /// First day covered.
    pub start_date: NaiveDate,
    /// Last day covered.
    pub end_date: NaiveDate,
    /// Categories, largest total first.
    pub categories: Vec<CategoryTotal>,
}

fn year_month_or_now(year: Option<i32>, month: Option<u32>) -> (i32, u32) {
    let today = Utc::now().date_naive();
    (
        year.unwrap_or_else(|| today.year()),
        month.unwrap_or_else(|| today.month()),
    )
}

impl BreakdownQuery {
    fn date_bounds(&self) -> Result<(NaiveDate, NaiveDate), ApiError> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Ok((start, end)),
            (None, None) => {
                let (year, month) = year_month_or_now(self.year, self.month);
                let range = DateRange::month(year, month)
                    .map_err(|e| ApiError::validation(e.to_string()))?;
                Ok((range.start(), range.end()))
            }
            _ => Err(ApiError::validation(
                "start_date and end_date must be given together",
            )),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /reports/monthly - Income, expense, and balance for one month.
async fn get_monthly_summary(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<MonthlyQuery>,
) -> Result<Json<MonthlySummary>, ApiError> {
    let (year, month) = year_month_or_now(query.year, query.month);

    let mut summary = ReportRepository::new(state.conn())
        .monthly_summary(user.user_id(), year, month)
        .await?;
    summary.income_total = summary.income_total.normalize();
    summary.expense_total = summary.expense_total.normalize();
    summary.balance = summary.balance.normalize();

    Ok(Json(summary))
}

/// GET /reports/category-breakdown - Per-category totals over a date range.
async fn get_category_breakdown(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<BreakdownQuery>,
) -> Result<Json<CategoryBreakdownResponse>, ApiError> {
    let (start, end) = query.date_bounds()?;

    let breakdown = ReportRepository::new(state.conn())
        .category_breakdown(user.user_id(), start, end, query.kind)
        .await?;

    Ok(Json(CategoryBreakdownResponse {
        start_date: breakdown.start_date,
        end_date: breakdown.end_date,
        categories: breakdown
            .categories
            .into_iter()
            .map(|c| CategoryTotal {
                total: c.total.normalize(),
                ..c
            })
            .collect(),
    }))
}
