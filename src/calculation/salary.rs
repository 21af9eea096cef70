//! Salary formula.
//!
//! This module contains the strictly-typed calculation input, its boundary
//! validation, and the pure function applying the payroll formula:
//! `net = max(0, base + bonus - deductions)`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::settings::SalarySettings;

use super::working_data::WorkingData;

/// The complete input to one salary calculation.
///
/// Counts are unsigned; monetary fields and overtime hours are validated
/// as non-negative at the boundary by [`SalaryInput::validate`] before
/// they reach the pure calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryInput {
    /// Count of days with a complete check-in/check-out pair.
    pub working_days: u32,
    /// Pay per working day.
    pub shift_rate: Decimal,
    /// Overtime hours worked beyond the daily standard.
    pub overtime_hours: Decimal,
    /// Pay per overtime hour.
    pub overtime_rate: Decimal,
    /// KPI bonus component.
    pub kpi_bonus: Decimal,
    /// Sales bonus component.
    pub sales_bonus: Decimal,
    /// Weekend-work bonus component.
    pub weekend_bonus: Decimal,
    /// Any other bonus component.
    pub other_bonus: Decimal,
    /// Number of late occurrences.
    pub late_count: u32,
    /// Penalty charged per late occurrence.
    pub late_penalty_per_occurrence: Decimal,
    /// Number of unexcused absence days.
    pub absence_count: u32,
    /// Penalty charged per absence day.
    pub absence_penalty_per_day: Decimal,
    /// Free-form penalty for policy violations.
    pub violation_penalty: Decimal,
}

impl SalaryInput {
    /// Builds the automatic bulk-run input from aggregated attendance.
    ///
    /// Rates come from the settings defaults; bonuses, absences and the
    /// violation penalty stay zero and are edited manually afterwards.
    /// Overtime hours are carried fractionally, the same policy the
    /// manual-entry path uses.
    pub fn from_attendance(
        working: &WorkingData,
        late_count: u32,
        settings: &SalarySettings,
    ) -> Self {
        Self {
            working_days: working.working_days,
            shift_rate: settings.default_shift_rate,
            overtime_hours: working.overtime_hours,
            overtime_rate: settings.default_overtime_rate,
            kpi_bonus: Decimal::ZERO,
            sales_bonus: Decimal::ZERO,
            weekend_bonus: Decimal::ZERO,
            other_bonus: Decimal::ZERO,
            late_count,
            late_penalty_per_occurrence: settings.late_penalty_per_occurrence,
            absence_count: 0,
            absence_penalty_per_day: settings.absence_penalty_per_day,
            violation_penalty: Decimal::ZERO,
        }
    }

    /// Validates that no monetary field or hour count is negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] naming the first offending
    /// field.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("shift_rate", self.shift_rate),
            ("overtime_hours", self.overtime_hours),
            ("overtime_rate", self.overtime_rate),
            ("kpi_bonus", self.kpi_bonus),
            ("sales_bonus", self.sales_bonus),
            ("weekend_bonus", self.weekend_bonus),
            ("other_bonus", self.other_bonus),
            ("late_penalty_per_occurrence", self.late_penalty_per_occurrence),
            ("absence_penalty_per_day", self.absence_penalty_per_day),
            ("violation_penalty", self.violation_penalty),
        ];

        for (field, value) in fields {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidInput {
                    field: field.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// The itemized components of a salary breakdown.
///
/// Displayed to the employee line by line; the enclosing
/// [`SalaryBreakdown`] carries the aggregates used for monthly statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownDetails {
    /// Working days times the shift rate.
    pub shift_salary: Decimal,
    /// Overtime hours times the overtime rate.
    pub overtime_salary: Decimal,
    /// KPI bonus component.
    pub kpi_bonus: Decimal,
    /// Sales bonus component.
    pub sales_bonus: Decimal,
    /// Weekend-work bonus component.
    pub weekend_bonus: Decimal,
    /// Any other bonus component.
    pub other_bonus: Decimal,
    /// Late occurrences times the per-occurrence penalty.
    pub late_penalty: Decimal,
    /// Absence days times the per-day penalty.
    pub absence_penalty: Decimal,
    /// Free-form violation penalty, passed through.
    pub violation_penalty: Decimal,
}

/// The full result of one salary calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Shift pay plus overtime pay.
    pub base_salary: Decimal,
    /// Overtime pay alone.
    pub overtime_pay: Decimal,
    /// Sum of all bonus components.
    pub total_bonus: Decimal,
    /// Sum of all penalty components.
    pub total_deductions: Decimal,
    /// Final amount, floored at zero.
    pub net_salary: Decimal,
    /// The itemized components behind the aggregates.
    pub details: BreakdownDetails,
}

/// Applies the payroll formula to a validated input.
///
/// Pure function, no I/O. Overtime pay uses fractional hours; the net
/// salary is floored at zero, so deductions can never drive it negative —
/// the shortfall is absorbed, not carried forward.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{SalaryInput, calculate_salary};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let input = SalaryInput {
///     working_days: 22,
///     shift_rate: dec("200000"),
///     overtime_hours: dec("5"),
///     overtime_rate: dec("30000"),
///     kpi_bonus: dec("500000"),
///     sales_bonus: Decimal::ZERO,
///     weekend_bonus: Decimal::ZERO,
///     other_bonus: Decimal::ZERO,
///     late_count: 2,
///     late_penalty_per_occurrence: dec("50000"),
///     absence_count: 0,
///     absence_penalty_per_day: dec("200000"),
///     violation_penalty: Decimal::ZERO,
/// };
///
/// let breakdown = calculate_salary(&input);
/// assert_eq!(breakdown.base_salary, dec("4550000"));
/// assert_eq!(breakdown.total_bonus, dec("500000"));
/// assert_eq!(breakdown.total_deductions, dec("100000"));
/// assert_eq!(breakdown.net_salary, dec("4950000"));
/// ```
pub fn calculate_salary(input: &SalaryInput) -> SalaryBreakdown {
    // Normalized so trailing zeros from fractional-hour arithmetic do not
    // leak into serialized amounts.
    let shift_salary = (Decimal::from(input.working_days) * input.shift_rate).normalize();
    let overtime_salary = (input.overtime_hours * input.overtime_rate).normalize();
    let base_salary = shift_salary + overtime_salary;

    let total_bonus =
        input.kpi_bonus + input.sales_bonus + input.weekend_bonus + input.other_bonus;

    let late_penalty =
        (Decimal::from(input.late_count) * input.late_penalty_per_occurrence).normalize();
    let absence_penalty =
        (Decimal::from(input.absence_count) * input.absence_penalty_per_day).normalize();
    let total_deductions = late_penalty + absence_penalty + input.violation_penalty;

    let net_salary = (base_salary + total_bonus - total_deductions)
        .max(Decimal::ZERO)
        .normalize();

    SalaryBreakdown {
        base_salary,
        overtime_pay: overtime_salary,
        total_bonus,
        total_deductions,
        net_salary,
        details: BreakdownDetails {
            shift_salary,
            overtime_salary,
            kpi_bonus: input.kpi_bonus,
            sales_bonus: input.sales_bonus,
            weekend_bonus: input.weekend_bonus,
            other_bonus: input.other_bonus,
            late_penalty,
            absence_penalty,
            violation_penalty: input.violation_penalty,
        },
    }
}
