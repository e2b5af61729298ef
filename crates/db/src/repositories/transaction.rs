//! Transaction repository for income/expense records.
//!
//! Every query is scoped by owner: a transaction that belongs to another
//! user is reported as not found.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use fintrack_core::TransactionKind;
use fintrack_core::transaction::{AmountError, validate_amount};
use fintrack_shared::types::pagination::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::TransactionType, transactions};

/// Error types for transaction operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found (or owned by someone else).
    #[error("Transaction not found: {0}")]
    NotFound(Uuid),

    /// Amount is not positive, too precise, or too large to store.
    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    /// Category is empty after trimming.
    #[error("category must not be empty")]
    EmptyCategory,

    /// The owning user no longer exists.
    #[error("User not found: {0}")]
    OwnerNotFound(Uuid),

    /// Filter range with start after end.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owner.
    pub user_id: Uuid,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Positive amount.
    pub amount: Decimal,
    /// Category label.
    pub category: String,
    /// Date the transaction happened.
    pub occurred_on: NaiveDate,
    /// Optional free-form note.
    pub note: Option<String>,
}

/// Partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// New kind.
    pub kind: Option<TransactionKind>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New category.
    pub category: Option<String>,
    /// New date.
    pub occurred_on: Option<NaiveDate>,
    /// New note; `Some(None)` clears it.
    pub note: Option<Option<String>>,
}

impl UpdateTransactionInput {
    /// Returns true if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.occurred_on.is_none()
            && self.note.is_none()
    }
}

/// Filter options for listing transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by kind.
    pub kind: Option<TransactionKind>,
    /// Filter by exact category.
    pub category: Option<String>,
    /// Inclusive lower date bound.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilter {
    fn condition(&self, user_id: Uuid) -> Result<Condition, TransactionError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err(TransactionError::InvalidDateRange { start, end });
        }

        let mut condition = Condition::all().add(transactions::Column::UserId.eq(user_id));
        if let Some(kind) = self.kind {
            condition = condition.add(transactions::Column::Kind.eq(TransactionType::from(kind)));
        }
        if let Some(category) = &self.category {
            condition = condition.add(transactions::Column::Category.eq(category.as_str()));
        }
        if let Some(start) = self.start_date {
            condition = condition.add(transactions::Column::OccurredOn.gte(start));
        }
        if let Some(end) = self.end_date {
            condition = condition.add(transactions::Column::OccurredOn.lte(end));
        }
        Ok(condition)
    }
}

fn normalize_category(category: &str) -> Result<String, TransactionError> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Err(TransactionError::EmptyCategory);
    }
    Ok(trimmed.to_string())
}

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: Arc<DatabaseConnection>,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is invalid, the category is blank,
    /// the owner no longer exists, or the database insert fails.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let amount = validate_amount(input.amount)?;
        let category = normalize_category(&input.category)?;
        let now = Utc::now().into();

        let model = transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            amount: Set(amount),
            category: Set(category),
            kind: Set(input.kind.into()),
            occurred_on: Set(input.occurred_on),
            note: Set(input.note),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                TransactionError::OwnerNotFound(input.user_id)
            }
            _ => err.into(),
        })?;

        tracing::info!(
            transaction_id = %model.id,
            user_id = %model.user_id,
            kind = %input.kind,
            "Transaction created"
        );
        Ok(model)
    }

    /// Lists a user's transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter range is inverted or the query fails.
    pub async fn list(
        &self,
        user_id: Uuid,
        filter: &TransactionFilter,
        page: &PageRequest,
    ) -> Result<PageResponse<transactions::Model>, TransactionError> {
        let condition = filter.condition(user_id)?;

        let total = transactions::Entity::find()
            .filter(condition.clone())
            .count(self.db.as_ref())
            .await?;

        let rows = transactions::Entity::find()
            .filter(condition)
            .order_by_desc(transactions::Column::OccurredOn)
            .order_by_desc(transactions::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(self.db.as_ref())
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }

    /// Finds one of the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if the transaction does not exist
    /// or belongs to another user.
    pub async fn find(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<transactions::Model, TransactionError> {
        transactions::Entity::find_by_id(id)
            .filter(transactions::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await?
            .ok_or(TransactionError::NotFound(id))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not found, a new amount is not
    /// positive, a new category is blank, or the database update fails.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        input: UpdateTransactionInput,
    ) -> Result<transactions::Model, TransactionError> {
        let amount = input.amount.map(validate_amount).transpose()?;
        let category = input
            .category
            .as_deref()
            .map(normalize_category)
            .transpose()?;

        let existing = self.find(user_id, id).await?;
        if input.is_empty() {
            return Ok(existing);
        }

        let mut active = existing.into_active_model();
        if let Some(kind) = input.kind {
            active.kind = Set(kind.into());
        }
        if let Some(amount) = amount {
            active.amount = Set(amount);
        }
        if let Some(category) = category {
            active.category = Set(category);
        }
        if let Some(occurred_on) = input.occurred_on {
            active.occurred_on = Set(occurred_on);
        }
        if let Some(note) = input.note {
            active.note = Set(note);
        }
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(self.db.as_ref()).await?;
        tracing::info!(transaction_id = %id, %user_id, "Transaction updated");
        Ok(updated)
    }

    /// Deletes one of the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns `TransactionError::NotFound` if nothing was deleted.
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), TransactionError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id))
            .filter(transactions::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(TransactionError::NotFound(id));
        }

        tracing::info!(transaction_id = %id, %user_id, "Transaction deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "transaction_tests.rs"]
mod tests;
