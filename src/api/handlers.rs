//! HTTP request handlers for the Payroll Computation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_salary;

use super::request::{
    CalculateRequest, RunPayrollRequest, SaveSalaryRequest, UpdateStatusRequest, WorkingDataQuery,
};
use super::response::{ApiError, ApiErrorResponse, SavedSalaryResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/payroll/run", post(run_payroll_handler))
        .route("/salary", post(save_salary_handler))
        .route("/salary/status", post(update_status_handler))
        .route("/working-data", get(working_data_handler))
        .with_state(state)
}

/// Handler for POST /calculate.
///
/// Resolves omitted rates from the deployment settings, validates the
/// input, and returns the itemized breakdown without persisting anything.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Correlation ID for request tracking.
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries the detailed serde error.
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let input = request.into_input(state.runner().settings());
    if let Err(error) = input.validate() {
        warn!(correlation_id = %correlation_id, error = %error, "Invalid salary input");
        let api_error: ApiErrorResponse = error.into();
        return api_error.into_response();
    }

    let breakdown = calculate_salary(&input);
    info!(
        correlation_id = %correlation_id,
        net_salary = %breakdown.net_salary,
        "Calculation completed successfully"
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(breakdown),
    )
        .into_response()
}

/// Handler for POST /payroll/run.
async fn run_payroll_handler(
    State(state): State<AppState>,
    Json(request): Json<RunPayrollRequest>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        month = %request.month,
        "Processing bulk payroll run"
    );

    match state.runner().run_for_month(request.month).await {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                succeeded = report.succeeded_count(),
                failed = report.failed_count(),
                "Bulk payroll run completed"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(error) => {
            warn!(correlation_id = %correlation_id, error = %error, "Bulk payroll run failed");
            let api_error: ApiErrorResponse = error.into();
            api_error.into_response()
        }
    }
}

/// Handler for POST /salary.
async fn save_salary_handler(
    State(state): State<AppState>,
    Json(request): Json<SaveSalaryRequest>,
) -> Response {
    let SaveSalaryRequest {
        employee_id,
        month,
        salary,
        violation_notes,
        notes,
    } = request;

    let input = salary.into_input(state.runner().settings());
    match state
        .runner()
        .save_salary(&employee_id, month, &input, violation_notes, notes)
    {
        Ok((record, breakdown)) => {
            info!(employee_id = %employee_id, month = %month, "Salary record saved");
            (StatusCode::OK, Json(SavedSalaryResponse { record, breakdown })).into_response()
        }
        Err(error) => {
            warn!(employee_id = %employee_id, error = %error, "Salary save failed");
            let api_error: ApiErrorResponse = error.into();
            api_error.into_response()
        }
    }
}

/// Handler for POST /salary/status.
async fn update_status_handler(
    State(state): State<AppState>,
    Json(request): Json<UpdateStatusRequest>,
) -> Response {
    match state.runner().update_status(request.id, request.status) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(error) => {
            warn!(id = %request.id, error = %error, "Status update failed");
            let api_error: ApiErrorResponse = error.into();
            api_error.into_response()
        }
    }
}

/// Handler for GET /working-data.
async fn working_data_handler(
    State(state): State<AppState>,
    Query(query): Query<WorkingDataQuery>,
) -> Response {
    let shift = query.shift();
    match state
        .runner()
        .working_data_for(&query.employee_id, query.month, shift.as_ref())
    {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(error) => {
            warn!(employee_id = %query.employee_id, error = %error, "Aggregation failed");
            let api_error: ApiErrorResponse = error.into();
            api_error.into_response()
        }
    }
}
