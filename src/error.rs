//! Error types for the Payroll Computation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll processing.

use thiserror::Error;
use uuid::Uuid;

use crate::models::SalaryStatus;

/// The main error type for the Payroll Computation Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidMonth {
///     value: "2026-13".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid month '2026-13': expected YYYY-MM");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A salary input field failed boundary validation.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A month string could not be parsed as `YYYY-MM`.
    #[error("Invalid month '{value}': expected YYYY-MM")]
    InvalidMonth {
        /// The value that failed to parse.
        value: String,
    },

    /// The salary settings file could not be read or parsed.
    #[error("Failed to load salary settings from '{path}': {message}")]
    SettingsParse {
        /// The path to the settings file.
        path: String,
        /// A description of the read or parse error.
        message: String,
    },

    /// A salary record read or write failed in the backing store.
    #[error("Persistence failure: {message}")]
    Persistence {
        /// A description of the store failure.
        message: String,
    },

    /// No salary record exists with the given ID.
    #[error("Salary record not found: {id}")]
    RecordNotFound {
        /// The record ID that was not found.
        id: Uuid,
    },

    /// A salary record status change would move backwards.
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// The current status of the record.
        from: SalaryStatus,
        /// The requested status.
        to: SalaryStatus,
    },

    /// A single employee's payroll computation exceeded the batch deadline.
    #[error("Payroll computation for employee '{employee_id}' timed out")]
    EmployeeTimeout {
        /// The employee whose computation was abandoned.
        employee_id: String,
    },

    /// A notification could not be delivered. Always non-fatal to callers.
    #[error("Notification failure: {message}")]
    Notification {
        /// A description of the delivery failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "shift_rate".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid input field 'shift_rate': must not be negative"
        );
    }

    #[test]
    fn test_invalid_month_displays_value() {
        let error = EngineError::InvalidMonth {
            value: "garbage".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid month 'garbage': expected YYYY-MM");
    }

    #[test]
    fn test_settings_parse_displays_path_and_message() {
        let error = EngineError::SettingsParse {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to load salary settings from '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_record_not_found_displays_id() {
        let error = EngineError::RecordNotFound { id: Uuid::nil() };
        assert_eq!(
            error.to_string(),
            "Salary record not found: 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_invalid_status_transition_displays_both_states() {
        let error = EngineError::InvalidStatusTransition {
            from: SalaryStatus::Paid,
            to: SalaryStatus::Draft,
        };
        assert_eq!(error.to_string(), "Invalid status transition: paid -> draft");
    }

    #[test]
    fn test_employee_timeout_displays_employee() {
        let error = EngineError::EmployeeTimeout {
            employee_id: "emp_007".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Payroll computation for employee 'emp_007' timed out"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_persistence_error() -> EngineResult<()> {
            Err(EngineError::Persistence {
                message: "connection refused".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_persistence_error()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
