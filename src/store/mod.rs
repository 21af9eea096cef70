//! Collaborator contracts at the engine boundary.
//!
//! The engine reads attendance, writes salary records, and fires
//! best-effort notifications; this module defines the traits those
//! external systems implement, plus in-memory implementations used by the
//! tests and sample wiring. Any durable relational store with a unique
//! constraint on `(employee_id, month)` satisfies [`SalaryStore`].

mod memory;

pub use memory::{LoggingNotifier, MemoryAttendance, MemorySalaryStore};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{AttendanceEvent, PayMonth, SalaryRecord, SalaryStatus};

/// Read access to the attendance event log.
///
/// The engine never writes attendance; it reads events scoped by month,
/// and optionally by employee, through this interface.
pub trait AttendanceSource: Send + Sync {
    /// Returns all employees' events within the month window.
    fn events_for_month(&self, month: PayMonth) -> EngineResult<Vec<AttendanceEvent>>;

    /// Returns one employee's events within the month window.
    fn employee_events_for_month(
        &self,
        employee_id: &str,
        month: PayMonth,
    ) -> EngineResult<Vec<AttendanceEvent>>;
}

/// Persistence for salary records.
pub trait SalaryStore: Send + Sync {
    /// Inserts or replaces the record for its `(employee_id, month)` key.
    ///
    /// On conflict the stored row keeps its original ID; all other fields
    /// take the incoming record's values.
    fn upsert(&self, record: &SalaryRecord) -> EngineResult<()>;

    /// Returns the record with the given ID, if any.
    fn get(&self, id: Uuid) -> EngineResult<Option<SalaryRecord>>;

    /// Returns the record for an `(employee_id, month)` pair, if any.
    fn find(&self, employee_id: &str, month: PayMonth) -> EngineResult<Option<SalaryRecord>>;

    /// Persists a status change for the record with the given ID.
    fn update_status(&self, id: Uuid, status: SalaryStatus) -> EngineResult<()>;
}

/// What a salary notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A salary record was saved interactively.
    SalarySaved,
    /// A salary record transitioned to paid.
    SalaryPaid,
}

/// The payload handed to a notifier after a save or a paid transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryNotification {
    /// What happened.
    pub kind: NotificationKind,
    /// The employee concerned.
    pub employee_id: String,
    /// The salary month concerned.
    pub month: PayMonth,
    /// The net amount of the record.
    pub net_salary: Decimal,
}

/// Best-effort outbound notification channel (e.g. email).
///
/// Delivery failures are logged and swallowed by the engine; they never
/// block or roll back a salary write.
pub trait SalaryNotifier: Send + Sync {
    /// Delivers one notification.
    fn notify(&self, notification: &SalaryNotification) -> EngineResult<()>;
}
