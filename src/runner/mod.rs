//! Bulk payroll runs and interactive salary operations.
//!
//! This module owns the batch that derives and upserts one draft salary
//! record per employee with attendance in a target month, with per-employee
//! failure isolation, bounded concurrency and a per-employee timeout. It
//! also carries the interactive single-employee save and the status
//! transition, both of which fire best-effort notifications.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    LATE_GRACE_MINUTES, SalaryBreakdown, SalaryInput, WorkingData, aggregate, calculate_salary,
    validated_late_count,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceEvent, PayMonth, SalaryRecord, SalaryStatus, ShiftExpectation};
use crate::settings::SalarySettings;
use crate::store::{
    AttendanceSource, NotificationKind, SalaryNotification, SalaryNotifier, SalaryStore,
};

/// Notes marker written on every automatically derived record.
pub const AUTO_CALC_NOTES: &str = "Auto-calculated from attendance";

/// Tuning for a bulk payroll run.
#[derive(Debug, Clone, Copy)]
pub struct RunnerOptions {
    /// Maximum number of employees processed concurrently.
    pub concurrency: usize,
    /// Deadline for a single employee's computation and upsert.
    pub employee_timeout: Duration,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            concurrency: 8,
            employee_timeout: Duration::from_secs(30),
        }
    }
}

/// One employee the batch could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFailure {
    /// The employee whose record was not written.
    pub employee_id: String,
    /// Why, in display form.
    pub reason: String,
}

/// The outcome of a bulk payroll run.
///
/// A run always completes; partial success is the expected outcome, not an
/// error state. Successes are not rolled back when other employees fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunReport {
    /// The month the run covered.
    pub month: PayMonth,
    /// Employees whose records were upserted, sorted.
    pub succeeded: Vec<String>,
    /// Employees whose processing failed, sorted by employee.
    pub failed: Vec<EmployeeFailure>,
}

impl PayrollRunReport {
    /// Number of employees whose records were written.
    pub fn succeeded_count(&self) -> usize {
        self.succeeded.len()
    }

    /// Number of employees that failed.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

/// Orchestrates payroll over the collaborator interfaces.
///
/// Holds the attendance source, the salary store, the notifier, and a
/// settings snapshot taken at construction; nothing here caches global
/// state, so rebuilding the runner picks up changed settings.
pub struct PayrollRunner {
    attendance: Arc<dyn AttendanceSource>,
    salaries: Arc<dyn SalaryStore>,
    notifier: Arc<dyn SalaryNotifier>,
    settings: SalarySettings,
    options: RunnerOptions,
}

impl PayrollRunner {
    /// Creates a runner with default [`RunnerOptions`].
    pub fn new(
        attendance: Arc<dyn AttendanceSource>,
        salaries: Arc<dyn SalaryStore>,
        notifier: Arc<dyn SalaryNotifier>,
        settings: SalarySettings,
    ) -> Self {
        Self {
            attendance,
            salaries,
            notifier,
            settings,
            options: RunnerOptions::default(),
        }
    }

    /// Replaces the run tuning.
    pub fn with_options(mut self, options: RunnerOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the settings snapshot the runner was built with.
    pub fn settings(&self) -> &SalarySettings {
        &self.settings
    }

    /// Derives working data for one employee, for interactive pre-fill.
    pub fn working_data_for(
        &self,
        employee_id: &str,
        month: PayMonth,
        shift: Option<&ShiftExpectation>,
    ) -> EngineResult<WorkingData> {
        let events = self.attendance.employee_events_for_month(employee_id, month)?;
        Ok(aggregate(&events, month, shift))
    }

    /// Runs payroll for every employee with attendance in `month`.
    ///
    /// Per employee, independently: aggregate the month's events (lateness
    /// from validation annotations with the 5-minute grace), apply the
    /// salary formula with the settings rates and zero bonuses, and upsert
    /// a draft record marked [`AUTO_CALC_NOTES`]. One employee's failure
    /// or timeout never aborts the batch.
    ///
    /// # Errors
    ///
    /// Fails only when the attendance log itself cannot be read; store
    /// failures are isolated per employee and reported in the result.
    pub async fn run_for_month(&self, month: PayMonth) -> EngineResult<PayrollRunReport> {
        let events = self.attendance.events_for_month(month)?;

        let mut by_employee: BTreeMap<String, Vec<AttendanceEvent>> = BTreeMap::new();
        for event in events {
            by_employee
                .entry(event.employee_id.clone())
                .or_default()
                .push(event);
        }

        info!(
            month = %month,
            employees = by_employee.len(),
            "starting bulk payroll run"
        );

        let semaphore = Arc::new(Semaphore::new(self.options.concurrency.max(1)));
        let mut tasks: JoinSet<(String, EngineResult<()>)> = JoinSet::new();

        for (employee_id, employee_events) in by_employee {
            let semaphore = Arc::clone(&semaphore);
            let salaries = Arc::clone(&self.salaries);
            let settings = self.settings.clone();
            let timeout = self.options.employee_timeout;

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        return (
                            employee_id.clone(),
                            Err(EngineError::Persistence {
                                message: "worker pool shut down".to_string(),
                            }),
                        );
                    }
                };

                let report_id = employee_id.clone();
                let computation = tokio::task::spawn_blocking(move || {
                    process_employee(&employee_id, &employee_events, month, &settings, salaries.as_ref())
                });

                // On timeout the blocking task may still finish in the
                // background; the report counts the employee as failed.
                let result = match tokio::time::timeout(timeout, computation).await {
                    Ok(Ok(result)) => result,
                    Ok(Err(join_error)) => Err(EngineError::Persistence {
                        message: join_error.to_string(),
                    }),
                    Err(_) => Err(EngineError::EmployeeTimeout {
                        employee_id: report_id.clone(),
                    }),
                };

                (report_id, result)
            });
        }

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((employee_id, Ok(()))) => succeeded.push(employee_id),
                Ok((employee_id, Err(error))) => {
                    warn!(
                        employee_id = %employee_id,
                        error = %error,
                        "payroll computation failed"
                    );
                    failed.push(EmployeeFailure {
                        employee_id,
                        reason: error.to_string(),
                    });
                }
                Err(join_error) => {
                    warn!(error = %join_error, "payroll worker aborted");
                }
            }
        }

        succeeded.sort();
        failed.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));

        info!(
            month = %month,
            succeeded = succeeded.len(),
            failed = failed.len(),
            "bulk payroll run finished"
        );

        Ok(PayrollRunReport {
            month,
            succeeded,
            failed,
        })
    }

    /// Validates, calculates and upserts one employee's salary record.
    ///
    /// The interactive path: callers supply the full input (typically
    /// pre-filled via [`PayrollRunner::working_data_for`] and then edited).
    /// After the write, a save notification is fired best-effort.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any write when the input carries
    /// a negative value, and a persistence error when the upsert fails; in
    /// both cases no partial state is left behind.
    pub fn save_salary(
        &self,
        employee_id: &str,
        month: PayMonth,
        input: &SalaryInput,
        violation_notes: Option<String>,
        notes: Option<String>,
    ) -> EngineResult<(SalaryRecord, SalaryBreakdown)> {
        input.validate()?;

        let breakdown = calculate_salary(input);
        let record = SalaryRecord::from_calculation(
            employee_id.to_string(),
            month,
            input,
            &breakdown,
            SalaryStatus::Draft,
            violation_notes,
            notes,
        );
        self.salaries.upsert(&record)?;

        self.dispatch(NotificationKind::SalarySaved, employee_id, month, &breakdown);
        Ok((record, breakdown))
    }

    /// Moves a salary record to a new status.
    ///
    /// Transitions are forward-only; a transition to paid fires a paid
    /// notification best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RecordNotFound`] for an unknown ID and
    /// [`EngineError::InvalidStatusTransition`] for a backward move.
    pub fn update_status(&self, id: Uuid, status: SalaryStatus) -> EngineResult<SalaryRecord> {
        let record = self
            .salaries
            .get(id)?
            .ok_or(EngineError::RecordNotFound { id })?;

        if !record.status.can_transition_to(status) {
            return Err(EngineError::InvalidStatusTransition {
                from: record.status,
                to: status,
            });
        }

        self.salaries.update_status(id, status)?;

        if status == SalaryStatus::Paid {
            let notification = SalaryNotification {
                kind: NotificationKind::SalaryPaid,
                employee_id: record.employee_id.clone(),
                month: record.month,
                net_salary: record.net_salary,
            };
            if let Err(error) = self.notifier.notify(&notification) {
                warn!(
                    employee_id = %record.employee_id,
                    error = %error,
                    "salary notification failed"
                );
            }
        }

        let mut updated = record;
        updated.status = status;
        Ok(updated)
    }

    fn dispatch(
        &self,
        kind: NotificationKind,
        employee_id: &str,
        month: PayMonth,
        breakdown: &SalaryBreakdown,
    ) {
        let notification = SalaryNotification {
            kind,
            employee_id: employee_id.to_string(),
            month,
            net_salary: breakdown.net_salary,
        };
        if let Err(error) = self.notifier.notify(&notification) {
            warn!(
                employee_id = %employee_id,
                error = %error,
                "salary notification failed"
            );
        }
    }
}

/// Computes and upserts one employee's automatic record.
fn process_employee(
    employee_id: &str,
    events: &[AttendanceEvent],
    month: PayMonth,
    settings: &SalarySettings,
    salaries: &dyn SalaryStore,
) -> EngineResult<()> {
    let working = aggregate(events, month, None);
    let late_count = validated_late_count(events, month, LATE_GRACE_MINUTES);

    let input = SalaryInput::from_attendance(&working, late_count, settings);
    let breakdown = calculate_salary(&input);
    let record = SalaryRecord::from_calculation(
        employee_id.to_string(),
        month,
        &input,
        &breakdown,
        SalaryStatus::Draft,
        None,
        Some(AUTO_CALC_NOTES.to_string()),
    );

    salaries.upsert(&record)
}
