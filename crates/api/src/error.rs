//! Mapping from domain errors to HTTP responses.
//!
//! Every error body has the shape `{"error": "<code>", "message": "<text>"}`.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fintrack_core::auth::PasswordError;
use fintrack_db::{ReportError, TransactionError, UserError};
use fintrack_shared::{AppError, JwtError};
use sea_orm::DbErr;
use serde_json::json;
use validator::ValidationErrors;

/// An error ready to be rendered as a JSON response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    /// Server-side detail, logged but never sent.
    detail: Option<String>,
}

impl ApiError {
    /// Creates an error with an explicit status and code.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            detail: None,
        }
    }

    /// 401 with the given code.
    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, message)
    }

    /// 400 `validation_error`.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into()).into()
    }

    /// 404 `not_found`.
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into()).into()
    }

    /// 500 `internal_error`; `detail` is logged, not returned.
    pub fn internal(detail: impl Into<String>) -> Self {
        AppError::Internal(detail.into()).into()
    }

    /// HTTP status of this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(detail) = &self.detail {
            tracing::error!(code = self.code, error = %detail, "Request failed");
        }

        let body = Json(json!({
            "error": self.code,
            "message": self.message,
        }));

        (self.status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            code: err.error_code(),
            message: err.public_message(),
            detail: err.is_server_error().then(|| err.to_string()),
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        AppError::Database(err.to_string()).into()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation(errors.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_query", rejection.body_text())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailTaken(_) => Self::new(
                StatusCode::CONFLICT,
                "email_exists",
                "An account with this email already exists",
            ),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<TransactionError> for ApiError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::NotFound(_) => Self::not_found("Transaction not found"),
            TransactionError::OwnerNotFound(_) => {
                Self::unauthorized("invalid_token", "Account no longer exists")
            }
            TransactionError::Database(e) => e.into(),
            invalid @ (TransactionError::InvalidAmount(_)
            | TransactionError::EmptyCategory
            | TransactionError::InvalidDateRange { .. }) => Self::validation(invalid.to_string()),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Invalid(e) => Self::validation(e.to_string()),
            ReportError::Database(e) => e.into(),
        }
    }
}
