//! HTTP API module for the Payroll Computation Engine.
//!
//! This module provides the REST endpoints for single-employee salary
//! calculation, bulk payroll runs, interactive saves and status changes.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    CalculateRequest, RunPayrollRequest, SaveSalaryRequest, UpdateStatusRequest, WorkingDataQuery,
};
pub use response::{ApiError, SavedSalaryResponse};
pub use state::AppState;
