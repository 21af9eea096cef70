//! Calculation logic for the Payroll Computation Engine.
//!
//! This module contains the pure domain logic: aggregating raw attendance
//! events into monthly working data, counting validated late occurrences,
//! and applying the salary formula to produce an itemized breakdown.

mod salary;
mod working_data;

pub use salary::{BreakdownDetails, SalaryBreakdown, SalaryInput, calculate_salary};
pub use working_data::{
    LATE_GRACE_MINUTES, STANDARD_HOURS_PER_DAY, WorkingData, aggregate, validated_late_count,
};
