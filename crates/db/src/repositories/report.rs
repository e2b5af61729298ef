//! Report repository: loads a user's transactions for a date range and
//! hands them to the aggregator in `fintrack_core::reports`.

use std::sync::Arc;

use chrono::NaiveDate;
use fintrack_core::TransactionKind;
use fintrack_core::reports::{
    CategoryBreakdown, DateRange, MonthlySummary, ReportEntry, ReportError as CoreReportError,
    ReportService,
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::TransactionType, transactions};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Invalid report parameters (month, year, or date range).
    #[error(transparent)]
    Invalid(#[from] CoreReportError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

fn to_entry(row: transactions::Model) -> ReportEntry {
    ReportEntry {
        kind: row.kind.into(),
        category: row.category,
        amount: row.amount,
        occurred_on: row.occurred_on,
    }
}

/// Report repository.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Income, expense, and balance for one calendar month.
    ///
    /// A month without transactions yields zeros.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Invalid` for a month outside 1-12 or a year
    /// outside 1000-9999, or a database error.
    pub async fn monthly_summary(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<MonthlySummary, ReportError> {
        let range = DateRange::month(year, month)?;
        let entries = self.load_entries(user_id, range, None).await?;

        Ok(ReportService::monthly_summary(&entries, year, month)?)
    }

    /// Per-category totals over an inclusive date range, largest first.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::Invalid` if `start > end`, or a database error.
    pub async fn category_breakdown(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        kind: Option<TransactionKind>,
    ) -> Result<CategoryBreakdown, ReportError> {
        let range = DateRange::new(start, end)?;
        let entries = self.load_entries(user_id, range, kind).await?;

        Ok(ReportService::category_breakdown_in(&entries, range))
    }

    async fn load_entries(
        &self,
        user_id: Uuid,
        range: DateRange,
        kind: Option<TransactionKind>,
    ) -> Result<Vec<ReportEntry>, DbErr> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::UserId.eq(user_id))
            .filter(transactions::Column::OccurredOn.gte(range.start()))
            .filter(transactions::Column::OccurredOn.lte(range.end()));

        if let Some(kind) = kind {
            query = query.filter(transactions::Column::Kind.eq(TransactionType::from(kind)));
        }

        let rows = query.all(self.db.as_ref()).await?;
        tracing::debug!(%user_id, rows = rows.len(), "Loaded report entries");

        Ok(rows.into_iter().map(to_entry).collect())
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
