//! Request types for the Payroll Computation Engine API.
//!
//! This module defines the JSON request structures for the calculation,
//! bulk run, save and status endpoints. Rate fields are optional in
//! requests; omitted rates fall back to the deployment's salary settings,
//! the same way the interactive entry form is pre-filled.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::SalaryInput;
use crate::models::{PayMonth, SalaryStatus, ShiftExpectation};
use crate::settings::SalarySettings;

/// Request body for the `/calculate` endpoint.
///
/// Only `working_days` is required; every other field defaults to zero,
/// and the rates default to the deployment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Count of working days in the month.
    pub working_days: u32,
    /// Pay per working day; defaults to the settings rate.
    #[serde(default)]
    pub shift_rate: Option<Decimal>,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Pay per overtime hour; defaults to the settings rate.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// KPI bonus component.
    #[serde(default)]
    pub kpi_bonus: Decimal,
    /// Sales bonus component.
    #[serde(default)]
    pub sales_bonus: Decimal,
    /// Weekend-work bonus component.
    #[serde(default)]
    pub weekend_bonus: Decimal,
    /// Any other bonus component.
    #[serde(default)]
    pub other_bonus: Decimal,
    /// Number of late occurrences.
    #[serde(default)]
    pub late_count: u32,
    /// Penalty per late occurrence; defaults to the settings rate.
    #[serde(default)]
    pub late_penalty_per_occurrence: Option<Decimal>,
    /// Number of unexcused absence days.
    #[serde(default)]
    pub absence_count: u32,
    /// Penalty per absence day; defaults to the settings rate.
    #[serde(default)]
    pub absence_penalty_per_day: Option<Decimal>,
    /// Free-form violation penalty.
    #[serde(default)]
    pub violation_penalty: Decimal,
}

impl CalculateRequest {
    /// Resolves the request into a calculation input, filling omitted
    /// rates from the settings.
    pub fn into_input(self, settings: &SalarySettings) -> SalaryInput {
        SalaryInput {
            working_days: self.working_days,
            shift_rate: self.shift_rate.unwrap_or(settings.default_shift_rate),
            overtime_hours: self.overtime_hours,
            overtime_rate: self.overtime_rate.unwrap_or(settings.default_overtime_rate),
            kpi_bonus: self.kpi_bonus,
            sales_bonus: self.sales_bonus,
            weekend_bonus: self.weekend_bonus,
            other_bonus: self.other_bonus,
            late_count: self.late_count,
            late_penalty_per_occurrence: self
                .late_penalty_per_occurrence
                .unwrap_or(settings.late_penalty_per_occurrence),
            absence_count: self.absence_count,
            absence_penalty_per_day: self
                .absence_penalty_per_day
                .unwrap_or(settings.absence_penalty_per_day),
            violation_penalty: self.violation_penalty,
        }
    }
}

/// Request body for the `/salary` save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSalaryRequest {
    /// The employee the salary belongs to.
    pub employee_id: String,
    /// The month the salary covers.
    pub month: PayMonth,
    /// The salary figures, resolved like a calculation request.
    #[serde(flatten)]
    pub salary: CalculateRequest,
    /// Optional description of penalized violations.
    #[serde(default)]
    pub violation_notes: Option<String>,
    /// Optional free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for the `/payroll/run` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunPayrollRequest {
    /// The month to run payroll for.
    pub month: PayMonth,
}

/// Request body for the `/salary/status` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    /// The salary record to move.
    pub id: Uuid,
    /// The status to move it to.
    pub status: SalaryStatus,
}

/// Query parameters for the `/working-data` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingDataQuery {
    /// The employee to aggregate.
    pub employee_id: String,
    /// The month to aggregate over.
    pub month: PayMonth,
    /// Expected shift start; enables lateness detection with `shift_end`.
    #[serde(default)]
    pub shift_start: Option<NaiveTime>,
    /// Expected shift end; enables early-leave detection with `shift_start`.
    #[serde(default)]
    pub shift_end: Option<NaiveTime>,
}

impl WorkingDataQuery {
    /// Builds the shift expectation when both boundaries were supplied.
    pub fn shift(&self) -> Option<ShiftExpectation> {
        match (self.shift_start, self.shift_end) {
            (Some(start_time), Some(end_time)) => Some(ShiftExpectation {
                start_time,
                end_time,
            }),
            _ => None,
        }
    }
}
