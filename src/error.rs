//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the service layer returns [`AppError`]. Handlers
//! propagate it with `?` and axum renders it through [`IntoResponse`] as:
//!
//! ```json
//! { "error": { "code": "code_conflict", "message": "...", "details": { ... } } }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Every failure the service can report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The long URL is empty or not an absolute URL with a supported scheme.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// A custom short code broke the length/charset rule or is reserved.
    #[error("{message}")]
    InvalidCode { message: String, details: Value },

    /// Malformed request body or query string.
    #[error("{message}")]
    BadRequest { message: String, details: Value },

    /// A caller-supplied code is already in use.
    #[error("Short code '{code}' already exists")]
    CodeConflict { code: String },

    /// The store rejected an insert on the short-code unique constraint.
    #[error("Short code '{code}' violates the unique constraint")]
    DuplicateCode { code: String },

    /// Every random candidate collided.
    #[error("Failed to generate a unique short code after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_code(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCode {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::BadRequest {
            message: message.into(),
            details,
        }
    }

    pub fn code_conflict(code: impl Into<String>) -> Self {
        Self::CodeConflict { code: code.into() }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. }
            | AppError::InvalidCode { .. }
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::CodeConflict { .. } | AppError::DuplicateCode { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AllocationExhausted { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into the JSON payload sent to clients.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            AppError::InvalidUrl { details, .. } => ("invalid_url", details.clone()),
            AppError::InvalidCode { details, .. } => ("invalid_code", details.clone()),
            AppError::BadRequest { details, .. } => ("validation_error", details.clone()),
            AppError::CodeConflict { code } => ("code_conflict", json!({ "code": code })),
            AppError::DuplicateCode { code } => ("code_conflict", json!({ "code": code })),
            AppError::AllocationExhausted { attempts } => {
                ("allocation_exhausted", json!({ "attempts": attempts }))
            }
            AppError::NotFound { details, .. } => ("not_found", details.clone()),
            AppError::Internal { details, .. } => ("internal_error", details.clone()),
        };

        ErrorInfo {
            code,
            message: self.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "Database error");
        AppError::internal("Internal storage error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        AppError::bad_request("Request validation failed", json!({ "fields": details }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query string",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
