//! API error types with IntoResponse
//!
//! Every failure a handler can produce is one of these variants. The variant
//! alone decides the status code, and the message text is built here and
//! nowhere else. Bodies are always `{"message": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::DbError;
use crate::models::ValidationError;

/// JSON error body
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub message: String,
}

/// Which storage call failed; selects the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    /// Insert or update; the driver text is returned bare
    Write,
    /// Single-row lookup
    Scan,
    /// Full-table read
    List,
}

impl StorageOp {
    fn prefix(self) -> &'static str {
        match self {
            Self::Write => "",
            Self::Scan => "Unable to scan expense:",
            Self::List => "Unable to get expenses from database:",
        }
    }
}

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Bad payload or id (400)
    Validation(ValidationError),

    /// Unparseable id on lookup (500).
    ///
    /// A client mistake, but lookups have always reported it as a server
    /// error and clients depend on that.
    LookupId { raw: String },

    /// No expense with the requested id (404)
    NotFound { id: i64 },

    /// Storage failure (500, logged)
    Storage { op: StorageOp, source: DbError },
}

impl ApiError {
    pub fn write(source: DbError) -> Self {
        Self::Storage {
            op: StorageOp::Write,
            source,
        }
    }

    pub fn scan(source: DbError) -> Self {
        Self::Storage {
            op: StorageOp::Scan,
            source,
        }
    }

    pub fn list(source: DbError) -> Self {
        Self::Storage {
            op: StorageOp::List,
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::LookupId { .. } | Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Validation(e) => e.to_string(),
            Self::LookupId { .. } => "ID is invalid".to_owned(),
            Self::NotFound { .. } => "Expense not found".to_owned(),
            Self::Storage { op, source } => format!("{}{}", op.prefix(), source),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Storage { op, source } => {
                tracing::error!(?op, error = %source, "Storage error");
            }
            Self::LookupId { raw } => {
                tracing::error!(id = %raw, "Invalid expense id");
            }
            Self::Validation(e) => {
                tracing::debug!(error = %e, "Rejected request");
            }
            Self::NotFound { id } => {
                tracing::debug!(id, "Expense not found");
            }
        }

        let body = ErrorBody {
            message: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
