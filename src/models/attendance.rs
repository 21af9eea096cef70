//! Attendance event model and related types.
//!
//! This module defines the raw check-in/check-out event read from the
//! attendance subsystem, the optional per-event lateness validation
//! annotation, and the expected shift used for lateness detection.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// The kind of a raw attendance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceKind {
    /// The employee swiped in.
    CheckIn,
    /// The employee swiped out.
    CheckOut,
}

/// Lateness annotation attached to a check-in by the validation subsystem.
///
/// When present on a check-in, the bulk payroll run uses it (instead of a
/// shift expectation) to decide whether the day counts as a late occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatenessValidation {
    /// Whether the check-in was within the allowed window.
    pub is_on_time: bool,
    /// Minutes past the expected start, zero when on time.
    pub minutes_late: i64,
}

/// One swipe record for one employee.
///
/// Events are immutable and owned by the attendance subsystem; this engine
/// only reads them, scoped by employee and calendar month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AttendanceEvent, AttendanceKind};
/// use chrono::NaiveDateTime;
///
/// let event = AttendanceEvent {
///     employee_id: "emp_001".to_string(),
///     timestamp: NaiveDateTime::parse_from_str("2026-01-15 08:58:00", "%Y-%m-%d %H:%M:%S")
///         .unwrap(),
///     kind: AttendanceKind::CheckIn,
///     validation: None,
/// };
/// assert_eq!(event.kind, AttendanceKind::CheckIn);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    /// The employee the event belongs to.
    pub employee_id: String,
    /// The instant the swipe happened.
    pub timestamp: NaiveDateTime,
    /// Whether the swipe was a check-in or a check-out.
    pub kind: AttendanceKind,
    /// Optional lateness annotation, present only on validated check-ins.
    #[serde(default)]
    pub validation: Option<LatenessValidation>,
}

/// Expected working hours as wall-clock times of day.
///
/// Supplying a shift expectation enables lateness and early-leave detection
/// during aggregation; omitting it disables both without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftExpectation {
    /// The expected start of the working day.
    pub start_time: NaiveTime,
    /// The expected end of the working day.
    pub end_time: NaiveTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AttendanceKind::CheckIn).unwrap(),
            "\"check_in\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceKind::CheckOut).unwrap(),
            "\"check_out\""
        );
    }

    #[test]
    fn test_deserialize_event_without_validation() {
        let json = r#"{
            "employee_id": "emp_001",
            "timestamp": "2026-01-15T08:58:00",
            "kind": "check_in"
        }"#;

        let event: AttendanceEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.employee_id, "emp_001");
        assert_eq!(event.kind, AttendanceKind::CheckIn);
        assert!(event.validation.is_none());
    }

    #[test]
    fn test_deserialize_event_with_validation() {
        let json = r#"{
            "employee_id": "emp_002",
            "timestamp": "2026-01-15T09:12:00",
            "kind": "check_in",
            "validation": { "is_on_time": false, "minutes_late": 12 }
        }"#;

        let event: AttendanceEvent = serde_json::from_str(json).unwrap();
        let validation = event.validation.unwrap();
        assert!(!validation.is_on_time);
        assert_eq!(validation.minutes_late, 12);
    }

    #[test]
    fn test_event_serialization_round_trip() {
        let event = AttendanceEvent {
            employee_id: "emp_003".to_string(),
            timestamp: NaiveDateTime::parse_from_str(
                "2026-01-15 17:30:00",
                "%Y-%m-%d %H:%M:%S",
            )
            .unwrap(),
            kind: AttendanceKind::CheckOut,
            validation: None,
        };

        let json = serde_json::to_string(&event).unwrap();
        let back: AttendanceEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_shift_expectation_deserialization() {
        let json = r#"{ "start_time": "09:00:00", "end_time": "17:00:00" }"#;
        let shift: ShiftExpectation = serde_json::from_str(json).unwrap();
        assert_eq!(shift.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(shift.end_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
    }
}
