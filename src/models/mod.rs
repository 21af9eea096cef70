//! Domain models for the Payroll Computation Engine.
//!
//! This module contains the attendance event types, the normalized pay
//! month key, and the persisted salary record entity.

mod attendance;
mod pay_month;
mod salary;

pub use attendance::{AttendanceEvent, AttendanceKind, LatenessValidation, ShiftExpectation};
pub use pay_month::PayMonth;
pub use salary::{SalaryRecord, SalaryStatus};
