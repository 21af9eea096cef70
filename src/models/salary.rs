//! Salary record model and status lifecycle.
//!
//! This module defines the persisted [`SalaryRecord`] entity, keyed
//! uniquely by `(employee_id, month)`, and its [`SalaryStatus`] lifecycle.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{SalaryBreakdown, SalaryInput};

use super::PayMonth;

/// The lifecycle status of a salary record.
///
/// Transitions are forward-only: `Draft -> Pending -> Paid` (skipping
/// forward is allowed). `Paid` is terminal; a record is never moved
/// backwards once money has been disbursed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    /// Created or recomputed, not yet submitted for payment.
    Draft,
    /// Awaiting payment.
    Pending,
    /// Payment disbursed. Terminal.
    Paid,
}

impl SalaryStatus {
    /// Returns true if a record in this status may move to `next`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::SalaryStatus;
    ///
    /// assert!(SalaryStatus::Draft.can_transition_to(SalaryStatus::Pending));
    /// assert!(SalaryStatus::Pending.can_transition_to(SalaryStatus::Paid));
    /// assert!(!SalaryStatus::Paid.can_transition_to(SalaryStatus::Draft));
    /// ```
    pub fn can_transition_to(self, next: SalaryStatus) -> bool {
        matches!(
            (self, next),
            (SalaryStatus::Draft, SalaryStatus::Pending)
                | (SalaryStatus::Draft, SalaryStatus::Paid)
                | (SalaryStatus::Pending, SalaryStatus::Paid)
        )
    }
}

impl fmt::Display for SalaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SalaryStatus::Draft => "draft",
            SalaryStatus::Pending => "pending",
            SalaryStatus::Paid => "paid",
        };
        write!(f, "{name}")
    }
}

/// The persisted salary entity for one employee and one month.
///
/// Records are written with an upsert keyed on `(employee_id, month)`:
/// recomputing for the same pair replaces the prior values rather than
/// versioning them. The itemized fields mirror the calculation inputs so
/// the record can be redisplayed and re-edited without recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Unique identifier of the record row.
    pub id: Uuid,
    /// The employee the salary belongs to.
    pub employee_id: String,
    /// The month the salary covers, normalized to its first day.
    pub month: PayMonth,
    /// Count of days with both a check-in and a check-out.
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
    /// Total penalty charged for late occurrences.
    pub late_penalty: Decimal,
    /// Number of unexcused absence days.
    pub absence_count: u32,
    /// Total penalty charged for absences.
    pub absence_penalty: Decimal,
    /// Free-form penalty for policy violations.
    pub violation_penalty: Decimal,
    /// Optional description of the violations penalized.
    pub violation_notes: Option<String>,
    /// Shift pay plus overtime pay.
    pub base_salary: Decimal,
    /// Sum of all bonus components.
    pub bonus: Decimal,
    /// Sum of all penalty components.
    pub deductions: Decimal,
    /// Final amount, floored at zero.
    pub net_salary: Decimal,
    /// Lifecycle status of the record.
    pub status: SalaryStatus,
    /// Free-form notes.
    pub notes: Option<String>,
}

impl SalaryRecord {
    /// Assembles a record from a calculation input and its breakdown.
    ///
    /// The record carries both the itemized inputs and the aggregate
    /// figures so downstream display and statistics need no recomputation.
    #[allow(clippy::too_many_arguments)]
    pub fn from_calculation(
        employee_id: String,
        month: PayMonth,
        input: &SalaryInput,
        breakdown: &SalaryBreakdown,
        status: SalaryStatus,
        violation_notes: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id,
            month,
            working_days: input.working_days,
            shift_rate: input.shift_rate,
            overtime_hours: input.overtime_hours,
            overtime_rate: input.overtime_rate,
            kpi_bonus: input.kpi_bonus,
            sales_bonus: input.sales_bonus,
            weekend_bonus: input.weekend_bonus,
            other_bonus: input.other_bonus,
            late_count: input.late_count,
            late_penalty: breakdown.details.late_penalty,
            absence_count: input.absence_count,
            absence_penalty: breakdown.details.absence_penalty,
            violation_penalty: input.violation_penalty,
            violation_notes,
            base_salary: breakdown.base_salary,
            bonus: breakdown.total_bonus,
            deductions: breakdown.total_deductions,
            net_salary: breakdown.net_salary,
            status,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_salary;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_input() -> SalaryInput {
        SalaryInput {
            working_days: 20,
            shift_rate: dec("200000"),
            overtime_hours: dec("3.5"),
            overtime_rate: dec("30000"),
            kpi_bonus: dec("100000"),
            sales_bonus: Decimal::ZERO,
            weekend_bonus: Decimal::ZERO,
            other_bonus: Decimal::ZERO,
            late_count: 1,
            late_penalty_per_occurrence: dec("50000"),
            absence_count: 0,
            absence_penalty_per_day: dec("200000"),
            violation_penalty: Decimal::ZERO,
        }
    }

    #[test]
    fn test_status_transitions_forward_only() {
        assert!(SalaryStatus::Draft.can_transition_to(SalaryStatus::Pending));
        assert!(SalaryStatus::Draft.can_transition_to(SalaryStatus::Paid));
        assert!(SalaryStatus::Pending.can_transition_to(SalaryStatus::Paid));

        assert!(!SalaryStatus::Pending.can_transition_to(SalaryStatus::Draft));
        assert!(!SalaryStatus::Paid.can_transition_to(SalaryStatus::Pending));
        assert!(!SalaryStatus::Paid.can_transition_to(SalaryStatus::Draft));
    }

    #[test]
    fn test_status_self_transition_rejected() {
        assert!(!SalaryStatus::Draft.can_transition_to(SalaryStatus::Draft));
        assert!(!SalaryStatus::Paid.can_transition_to(SalaryStatus::Paid));
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&SalaryStatus::Draft).unwrap(),
            "\"draft\""
        );
        assert_eq!(
            serde_json::to_string(&SalaryStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&SalaryStatus::Paid).unwrap(),
            "\"paid\""
        );
    }

    #[test]
    fn test_from_calculation_carries_aggregates_and_items() {
        let input = sample_input();
        let breakdown = calculate_salary(&input);
        let record = SalaryRecord::from_calculation(
            "emp_001".to_string(),
            "2026-01".parse().unwrap(),
            &input,
            &breakdown,
            SalaryStatus::Draft,
            None,
            Some("manual entry".to_string()),
        );

        // 20 * 200000 + 3.5 * 30000 = 4105000
        assert_eq!(record.base_salary, dec("4105000"));
        assert_eq!(record.bonus, dec("100000"));
        assert_eq!(record.deductions, dec("50000"));
        assert_eq!(record.net_salary, dec("4155000"));
        assert_eq!(record.late_penalty, dec("50000"));
        assert_eq!(record.absence_penalty, Decimal::ZERO);
        assert_eq!(record.working_days, 20);
        assert_eq!(record.status, SalaryStatus::Draft);
        assert_eq!(record.notes.as_deref(), Some("manual entry"));
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let input = sample_input();
        let breakdown = calculate_salary(&input);
        let record = SalaryRecord::from_calculation(
            "emp_001".to_string(),
            "2026-01".parse().unwrap(),
            &input,
            &breakdown,
            SalaryStatus::Pending,
            Some("phone damage".to_string()),
            None,
        );

        let json = serde_json::to_string(&record).unwrap();
        let back: SalaryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }
}
