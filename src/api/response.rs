//! Response types for the Payroll Computation Engine API.
//!
//! This module defines the error response structures and the save
//! endpoint's response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::calculation::SalaryBreakdown;
use crate::error::EngineError;
use crate::models::SalaryRecord;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// Response body for the `/salary` save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSalaryResponse {
    /// The persisted record.
    pub record: SalaryRecord,
    /// The breakdown behind it.
    pub breakdown: SalaryBreakdown,
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid input field '{}': {}", field, message),
                    "The salary input contains an invalid value",
                ),
            },
            EngineError::InvalidMonth { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_MONTH",
                    format!("Invalid month '{}'", value),
                    "Months must be formatted as YYYY-MM",
                ),
            },
            EngineError::SettingsParse { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Settings error",
                    format!("Failed to load {}: {}", path, message),
                ),
            },
            EngineError::Persistence { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "PERSISTENCE_ERROR",
                    "Salary record write failed",
                    message,
                ),
            },
            EngineError::RecordNotFound { id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new(
                    "RECORD_NOT_FOUND",
                    format!("Salary record not found: {}", id),
                ),
            },
            EngineError::InvalidStatusTransition { from, to } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_STATUS_TRANSITION",
                    format!("Invalid status transition: {} -> {}", from, to),
                    "Salary status only moves forward: draft -> pending -> paid",
                ),
            },
            EngineError::EmployeeTimeout { employee_id } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new(
                    "EMPLOYEE_TIMEOUT",
                    format!("Payroll computation for employee '{}' timed out", employee_id),
                ),
            },
            EngineError::Notification { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("NOTIFICATION_ERROR", message),
            },
        }
    }
}
