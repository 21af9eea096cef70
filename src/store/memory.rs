//! In-memory collaborator implementations.
//!
//! Used by the test suite and by embedders that want a self-contained
//! engine; production deployments implement the same traits over their
//! relational store and mail pipeline.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEvent, PayMonth, SalaryRecord, SalaryStatus};

use super::{AttendanceSource, SalaryNotification, SalaryNotifier, SalaryStore};

/// An immutable in-memory attendance event log.
#[derive(Debug, Default)]
pub struct MemoryAttendance {
    events: Vec<AttendanceEvent>,
}

impl MemoryAttendance {
    /// Creates a log holding the given events.
    pub fn new(events: Vec<AttendanceEvent>) -> Self {
        Self { events }
    }
}

impl AttendanceSource for MemoryAttendance {
    fn events_for_month(&self, month: PayMonth) -> EngineResult<Vec<AttendanceEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|event| month.contains(event.timestamp.date()))
            .cloned()
            .collect())
    }

    fn employee_events_for_month(
        &self,
        employee_id: &str,
        month: PayMonth,
    ) -> EngineResult<Vec<AttendanceEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|event| {
                event.employee_id == employee_id && month.contains(event.timestamp.date())
            })
            .cloned()
            .collect())
    }
}

/// An in-memory salary record table with a unique `(employee_id, month)` key.
#[derive(Debug, Default)]
pub struct MemorySalaryStore {
    records: Mutex<HashMap<(String, PayMonth), SalaryRecord>>,
}

impl MemorySalaryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all stored records.
    pub fn records(&self) -> Vec<SalaryRecord> {
        self.lock().values().cloned().collect()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true when no records are stored.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(String, PayMonth), SalaryRecord>> {
        match self.records.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl SalaryStore for MemorySalaryStore {
    fn upsert(&self, record: &SalaryRecord) -> EngineResult<()> {
        let mut records = self.lock();
        let key = (record.employee_id.clone(), record.month);
        let mut stored = record.clone();
        if let Some(existing) = records.get(&key) {
            // Conflict: the row keeps its identity, the values are replaced.
            stored.id = existing.id;
        }
        records.insert(key, stored);
        Ok(())
    }

    fn get(&self, id: Uuid) -> EngineResult<Option<SalaryRecord>> {
        Ok(self.lock().values().find(|r| r.id == id).cloned())
    }

    fn find(&self, employee_id: &str, month: PayMonth) -> EngineResult<Option<SalaryRecord>> {
        Ok(self
            .lock()
            .get(&(employee_id.to_string(), month))
            .cloned())
    }

    fn update_status(&self, id: Uuid, status: SalaryStatus) -> EngineResult<()> {
        let mut records = self.lock();
        match records.values_mut().find(|r| r.id == id) {
            Some(record) => {
                record.status = status;
                Ok(())
            }
            None => Err(EngineError::RecordNotFound { id }),
        }
    }
}

/// A notifier that logs deliveries instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl SalaryNotifier for LoggingNotifier {
    fn notify(&self, notification: &SalaryNotification) -> EngineResult<()> {
        info!(
            kind = ?notification.kind,
            employee_id = %notification.employee_id,
            month = %notification.month,
            net_salary = %notification.net_salary,
            "salary notification"
        );
        Ok(())
    }
}
