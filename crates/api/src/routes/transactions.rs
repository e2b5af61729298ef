//! Transaction CRUD routes, scoped to the authenticated user.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use fintrack_core::{TransactionKind, transaction::validate_amount};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    AppState,
    error::ApiError,
    extractors::{ValidatedJson, ValidatedQuery, nullable},
    middleware::AuthUser,
};
use fintrack_db::{
    CreateTransactionInput, TransactionFilter, TransactionRepository, UpdateTransactionInput,
    entities::transactions,
};
use fintrack_shared::types::pagination::{PageRequest, PageResponse};

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{transaction_id}",
            get(get_transaction)
                .patch(update_transaction)
                .delete(delete_transaction),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

fn validate_amount_field(amount: &Decimal) -> Result<(), ValidationError> {
    validate_amount(*amount)
        .map(|_| ())
        .map_err(|e| ValidationError::new("amount").with_message(e.to_string().into()))
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    /// Positive amount with at most four decimal places; the sign is
    /// carried by `type`.
    #[validate(custom(function = "validate_amount_field"))]
    pub amount: Decimal,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Category label.
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: String,
    /// Date of the transaction, today (UTC) if omitted.
    pub occurred_on: Option<NaiveDate>,
    /// Optional note.
    #[validate(length(max = 1000, message = "note must be at most 1000 characters"))]
    pub note: Option<String>,
}

/// Request body for a partial update.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTransactionRequest {
    /// New amount.
    #[validate(custom(function = "validate_amount_field"))]
    pub amount: Option<Decimal>,
    /// New kind.
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    /// New category.
    #[validate(length(min = 1, max = 100, message = "category must be 1-100 characters"))]
    pub category: Option<String>,
    /// New date.
    pub occurred_on: Option<NaiveDate>,
    /// New note; `null` clears it.
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 1000, message = "note must be at most 1000 characters"))]
    pub note: Option<Option<String>>,
}

/// Filters for listing transactions. Pagination is read separately.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListTransactionsQuery {
    /// Filter by kind.
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    /// Filter by exact category.
    pub category: Option<String>,
    /// Inclusive start date (YYYY-MM-DD).
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date (YYYY-MM-DD).
    pub end_date: Option<NaiveDate>,
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Positive amount.
    pub amount: Decimal,
    /// Category label.
    pub category: String,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Date of the transaction.
    pub occurred_on: NaiveDate,
    /// Optional note.
    pub note: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<transactions::Model> for TransactionResponse {
    fn from(model: transactions::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount.normalize(),
            category: model.category,
            kind: model.kind.into(),
            occurred_on: model.occurred_on,
            note: model.note,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /transactions - Create a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTransactionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateTransactionInput {
        user_id: user.user_id(),
        kind: payload.kind,
        amount: payload.amount,
        category: payload.category,
        occurred_on: payload
            .occurred_on
            .unwrap_or_else(|| Utc::now().date_naive()),
        note: payload.note,
    };

    let created = TransactionRepository::new(state.conn()).create(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::from(created)),
    ))
}

/// GET /transactions - List the caller's transactions, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedQuery(page): ValidatedQuery<PageRequest>,
    ValidatedQuery(query): ValidatedQuery<ListTransactionsQuery>,
) -> Result<Json<PageResponse<TransactionResponse>>, ApiError> {
    let filter = TransactionFilter {
        kind: query.kind,
        category: query.category,
        start_date: query.start_date,
        end_date: query.end_date,
    };
    debug!(user_id = %user.user_id(), ?filter, page = page.page, "Listing transactions");

    let result = TransactionRepository::new(state.conn())
        .list(user.user_id(), &filter, &page)
        .await?;

    Ok(Json(result.map(TransactionResponse::from)))
}

/// GET /transactions/{id} - Get one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let found = TransactionRepository::new(state.conn())
        .find(user.user_id(), transaction_id)
        .await?;

    Ok(Json(found.into()))
}

/// PATCH /transactions/{id} - Update some fields of a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTransactionRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let input = UpdateTransactionInput {
        kind: payload.kind,
        amount: payload.amount,
        category: payload.category,
        occurred_on: payload.occurred_on,
        note: payload.note,
    };

    let updated = TransactionRepository::new(state.conn())
        .update(user.user_id(), transaction_id, input)
        .await?;

    Ok(Json(updated.into()))
}

/// DELETE /transactions/{id} - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    user: AuthUser,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    TransactionRepository::new(state.conn())
        .delete(user.user_id(), transaction_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn create_request(amount: &str) -> CreateTransactionRequest {
        serde_json::from_value(json!({
            "amount": amount,
            "type": "expense",
            "category": "food"
        }))
        .unwrap()
    }

    #[rstest]
    #[case("12.5")]
    #[case("0.0001")]
    #[case("12.34560")]
    #[case("999999999999999.9999")]
    fn test_create_accepts_storable_amounts(#[case] amount: &str) {
        assert!(create_request(amount).validate().is_ok());
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("0.00001")]
    #[case("12.34567")]
    #[case("10000000000000000")]
    fn test_create_rejects_unstorable_amounts(#[case] amount: &str) {
        let errors = create_request(amount).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn test_update_distinguishes_missing_and_null_note() {
        let missing: UpdateTransactionRequest = serde_json::from_value(json!({})).unwrap();
        let cleared: UpdateTransactionRequest =
            serde_json::from_value(json!({ "note": null })).unwrap();

        assert_eq!(missing.note, None);
        assert_eq!(cleared.note, Some(None));
        assert!(cleared.validate().is_ok());
    }

    #[test]
    fn test_update_rejects_long_note() {
        let request: UpdateTransactionRequest =
            serde_json::from_value(json!({ "note": "x".repeat(1001) })).unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("note"));
    }

    #[test]
    fn test_update_validates_amount() {
        let request: UpdateTransactionRequest =
            serde_json::from_value(json!({ "amount": "1.23456" })).unwrap();

        assert!(request.validate().is_err());
    }
}
