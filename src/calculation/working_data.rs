//! Attendance aggregation.
//!
//! This module turns a raw sequence of check-in/check-out events for one
//! employee into monthly working-day counts, total hours and overtime
//! hours, optionally enriched with lateness detection against an expected
//! shift.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{AttendanceEvent, AttendanceKind, PayMonth, ShiftExpectation};

/// Daily hours threshold beyond which time counts as overtime.
pub const STANDARD_HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Minutes of lateness tolerated before a validated check-in counts as a
/// late occurrence.
pub const LATE_GRACE_MINUTES: i64 = 5;

/// Monthly working data derived from attendance events.
///
/// Derived, never persisted. A day contributes to `working_days` and the
/// hour totals only when it has both a check-in and a check-out; lone
/// events and inverted pairs (check-out before check-in) contribute
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingData {
    /// Count of dates with a complete check-in/check-out pair.
    pub working_days: u32,
    /// Sum of hours worked across qualifying days, rounded to 2 decimals.
    pub total_hours: Decimal,
    /// Sum of per-day hours beyond the standard, rounded to 2 decimals.
    pub overtime_hours: Decimal,
    /// Days where the check-in was after the expected shift start.
    pub late_count: u32,
    /// Days where the check-out was before the expected shift end.
    pub early_leave_count: u32,
}

/// A qualifying day: one calendar date with a usable check-in/check-out pair.
struct DayPair<'a> {
    check_in: &'a AttendanceEvent,
    check_out: &'a AttendanceEvent,
    hours: Decimal,
}

/// Pairs events into qualifying days within the month window.
///
/// Per date the earliest check-in and the latest check-out are used; days
/// missing either kind, or whose pair is inverted, are dropped.
fn qualifying_pairs(events: &[AttendanceEvent], month: PayMonth) -> Vec<DayPair<'_>> {
    let mut by_date: BTreeMap<NaiveDate, (Option<&AttendanceEvent>, Option<&AttendanceEvent>)> =
        BTreeMap::new();

    for event in events {
        let date = event.timestamp.date();
        if !month.contains(date) {
            continue;
        }
        let entry = by_date.entry(date).or_insert((None, None));
        match event.kind {
            AttendanceKind::CheckIn => {
                if entry.0.is_none_or(|first| event.timestamp < first.timestamp) {
                    entry.0 = Some(event);
                }
            }
            AttendanceKind::CheckOut => {
                if entry.1.is_none_or(|last| event.timestamp > last.timestamp) {
                    entry.1 = Some(event);
                }
            }
        }
    }

    by_date
        .into_values()
        .filter_map(|(check_in, check_out)| {
            let check_in = check_in?;
            let check_out = check_out?;
            let worked_minutes = (check_out.timestamp - check_in.timestamp).num_minutes();
            if worked_minutes < 0 {
                // Inverted pair: a data-quality defect, the day contributes nothing.
                return None;
            }
            Some(DayPair {
                check_in,
                check_out,
                hours: Decimal::new(worked_minutes, 0) / Decimal::new(60, 0),
            })
        })
        .collect()
}

/// Rounds an hour total to 2 decimal places, midpoint away from zero.
fn round_hours(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}

/// Aggregates one employee's attendance events over one calendar month.
///
/// Events outside `[first_day, last_day]` of `month` are ignored. Rounding
/// of the hour totals happens once at the end of aggregation, not per day.
/// When `shift` is absent, lateness and early-leave detection are disabled
/// and both counts stay zero. Empty input yields a zeroed result; no input
/// condition is an error.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::aggregate;
/// use payroll_engine::models::{AttendanceEvent, AttendanceKind};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let ts = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let events = vec![
///     AttendanceEvent {
///         employee_id: "emp_001".to_string(),
///         timestamp: ts("2026-01-15 09:00:00"),
///         kind: AttendanceKind::CheckIn,
///         validation: None,
///     },
///     AttendanceEvent {
///         employee_id: "emp_001".to_string(),
///         timestamp: ts("2026-01-15 18:30:00"),
///         kind: AttendanceKind::CheckOut,
///         validation: None,
///     },
/// ];
///
/// let data = aggregate(&events, "2026-01".parse().unwrap(), None);
/// assert_eq!(data.working_days, 1);
/// assert_eq!(data.total_hours, Decimal::new(95, 1)); // 9.5
/// assert_eq!(data.overtime_hours, Decimal::new(15, 1)); // 1.5
/// ```
pub fn aggregate(
    events: &[AttendanceEvent],
    month: PayMonth,
    shift: Option<&ShiftExpectation>,
) -> WorkingData {
    let mut data = WorkingData::default();
    let mut total_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;

    for pair in qualifying_pairs(events, month) {
        data.working_days += 1;
        total_hours += pair.hours;
        if pair.hours > STANDARD_HOURS_PER_DAY {
            overtime_hours += pair.hours - STANDARD_HOURS_PER_DAY;
        }

        if let Some(shift) = shift {
            if pair.check_in.timestamp.time() > shift.start_time {
                data.late_count += 1;
            }
            if pair.check_out.timestamp.time() < shift.end_time {
                data.early_leave_count += 1;
            }
        }
    }

    data.total_hours = round_hours(total_hours);
    data.overtime_hours = round_hours(overtime_hours);
    data
}

/// Counts late occurrences from validation annotations.
///
/// Only qualifying days are considered; a day counts as late when its
/// chosen check-in carries a validation that is flagged not-on-time with
/// more than `grace_minutes` minutes of lateness. Check-ins without an
/// annotation never count.
pub fn validated_late_count(events: &[AttendanceEvent], month: PayMonth, grace_minutes: i64) -> u32 {
    qualifying_pairs(events, month)
        .iter()
        .filter(|pair| match pair.check_in.validation {
            Some(validation) => !validation.is_on_time && validation.minutes_late > grace_minutes,
            None => false,
        })
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LatenessValidation;
    use chrono::{NaiveDateTime, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn event(timestamp: &str, kind: AttendanceKind) -> AttendanceEvent {
        AttendanceEvent {
            employee_id: "emp_001".to_string(),
            timestamp: ts(timestamp),
            kind,
            validation: None,
        }
    }

    fn check_in(timestamp: &str) -> AttendanceEvent {
        event(timestamp, AttendanceKind::CheckIn)
    }

    fn check_out(timestamp: &str) -> AttendanceEvent {
        event(timestamp, AttendanceKind::CheckOut)
    }

    fn validated_check_in(timestamp: &str, is_on_time: bool, minutes_late: i64) -> AttendanceEvent {
        AttendanceEvent {
            validation: Some(LatenessValidation {
                is_on_time,
                minutes_late,
            }),
            ..check_in(timestamp)
        }
    }

    fn january() -> PayMonth {
        "2026-01".parse().unwrap()
    }

    fn office_shift() -> ShiftExpectation {
        ShiftExpectation {
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_events_yield_zeroed_result() {
        let data = aggregate(&[], january(), None);
        assert_eq!(data, WorkingData::default());
    }

    #[test]
    fn test_complete_day_counts_hours() {
        let events = vec![
            check_in("2026-01-15 09:00:00"),
            check_out("2026-01-15 17:00:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 1);
        assert_eq!(data.total_hours, dec("8"));
        assert_eq!(data.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_lone_check_in_contributes_nothing() {
        let events = vec![check_in("2026-01-15 09:00:00")];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 0);
        assert_eq!(data.total_hours, Decimal::ZERO);
        assert_eq!(data.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_lone_check_out_contributes_nothing() {
        let events = vec![check_out("2026-01-15 17:00:00")];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 0);
        assert_eq!(data.total_hours, Decimal::ZERO);
    }

    #[test]
    fn test_exactly_eight_hours_is_not_overtime() {
        let events = vec![
            check_in("2026-01-15 08:30:00"),
            check_out("2026-01-15 16:30:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.total_hours, dec("8"));
        assert_eq!(data.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_nine_and_a_half_hours_yields_overtime() {
        let events = vec![
            check_in("2026-01-15 08:00:00"),
            check_out("2026-01-15 17:30:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.total_hours, dec("9.5"));
        assert_eq!(data.overtime_hours, dec("1.5"));
    }

    #[test]
    fn test_earliest_check_in_and_latest_check_out_win() {
        // Two check-ins and two check-outs the same day: the pair must be
        // 08:00 -> 18:00, not any of the inner combinations.
        let events = vec![
            check_in("2026-01-15 09:30:00"),
            check_in("2026-01-15 08:00:00"),
            check_out("2026-01-15 12:00:00"),
            check_out("2026-01-15 18:00:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 1);
        assert_eq!(data.total_hours, dec("10"));
        assert_eq!(data.overtime_hours, dec("2"));
    }

    #[test]
    fn test_inverted_pair_contributes_nothing() {
        // Check-out before check-in: data-quality defect, the day is dropped.
        let events = vec![
            check_out("2026-01-15 08:00:00"),
            check_in("2026-01-15 17:00:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 0);
        assert_eq!(data.total_hours, Decimal::ZERO);
        assert_eq!(data.overtime_hours, Decimal::ZERO);
    }

    #[test]
    fn test_inverted_day_does_not_corrupt_other_days() {
        let events = vec![
            check_out("2026-01-15 08:00:00"),
            check_in("2026-01-15 17:00:00"),
            check_in("2026-01-16 09:00:00"),
            check_out("2026-01-16 17:00:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 1);
        assert_eq!(data.total_hours, dec("8"));
    }

    #[test]
    fn test_zero_duration_day_still_counts() {
        let events = vec![
            check_in("2026-01-15 09:00:00"),
            check_out("2026-01-15 09:00:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 1);
        assert_eq!(data.total_hours, Decimal::ZERO);
    }

    #[test]
    fn test_events_outside_month_are_ignored() {
        let events = vec![
            check_in("2025-12-31 09:00:00"),
            check_out("2025-12-31 17:00:00"),
            check_in("2026-02-01 09:00:00"),
            check_out("2026-02-01 17:00:00"),
            check_in("2026-01-15 09:00:00"),
            check_out("2026-01-15 17:00:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 1);
        assert_eq!(data.total_hours, dec("8"));
    }

    #[test]
    fn test_rounding_happens_once_at_the_end() {
        // Two days of 7h20m each: 7.3333... + 7.3333... = 14.6666...,
        // which rounds to 14.67. Per-day rounding would give 14.66.
        let events = vec![
            check_in("2026-01-15 09:00:00"),
            check_out("2026-01-15 16:20:00"),
            check_in("2026-01-16 09:00:00"),
            check_out("2026-01-16 16:20:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 2);
        assert_eq!(data.total_hours, dec("14.67"));
    }

    #[test]
    fn test_overtime_rounding_to_two_decimals() {
        // 8h50m worked: 0.8333... overtime hours, rounds to 0.83.
        let events = vec![
            check_in("2026-01-15 09:00:00"),
            check_out("2026-01-15 17:50:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.overtime_hours, dec("0.83"));
    }

    #[test]
    fn test_late_and_early_leave_detection_with_shift() {
        let events = vec![
            // Late arrival, early leave.
            check_in("2026-01-15 09:05:00"),
            check_out("2026-01-15 16:50:00"),
            // On time both ways.
            check_in("2026-01-16 08:55:00"),
            check_out("2026-01-16 17:10:00"),
        ];

        let data = aggregate(&events, january(), Some(&office_shift()));
        assert_eq!(data.late_count, 1);
        assert_eq!(data.early_leave_count, 1);
    }

    #[test]
    fn test_exact_shift_boundaries_are_on_time() {
        let events = vec![
            check_in("2026-01-15 09:00:00"),
            check_out("2026-01-15 17:00:00"),
        ];

        let data = aggregate(&events, january(), Some(&office_shift()));
        assert_eq!(data.late_count, 0);
        assert_eq!(data.early_leave_count, 0);
    }

    #[test]
    fn test_missing_shift_disables_lateness_detection() {
        let events = vec![
            check_in("2026-01-15 11:00:00"),
            check_out("2026-01-15 15:00:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.late_count, 0);
        assert_eq!(data.early_leave_count, 0);
    }

    #[test]
    fn test_multi_day_totals() {
        let events = vec![
            check_in("2026-01-12 09:00:00"),
            check_out("2026-01-12 17:00:00"),
            check_in("2026-01-13 09:00:00"),
            check_out("2026-01-13 19:00:00"),
            check_in("2026-01-14 09:00:00"),
            check_out("2026-01-14 17:30:00"),
        ];

        let data = aggregate(&events, january(), None);
        assert_eq!(data.working_days, 3);
        assert_eq!(data.total_hours, dec("26.5"));
        assert_eq!(data.overtime_hours, dec("2.5"));
    }

    #[test]
    fn test_validated_late_beyond_grace_counts() {
        let events = vec![
            validated_check_in("2026-01-15 09:12:00", false, 12),
            check_out("2026-01-15 17:00:00"),
        ];

        assert_eq!(validated_late_count(&events, january(), LATE_GRACE_MINUTES), 1);
    }

    #[test]
    fn test_validated_late_within_grace_does_not_count() {
        let events = vec![
            validated_check_in("2026-01-15 09:03:00", false, 3),
            check_out("2026-01-15 17:00:00"),
        ];

        assert_eq!(validated_late_count(&events, january(), LATE_GRACE_MINUTES), 0);
    }

    #[test]
    fn test_validated_on_time_does_not_count() {
        let events = vec![
            validated_check_in("2026-01-15 09:00:00", true, 20),
            check_out("2026-01-15 17:00:00"),
        ];

        assert_eq!(validated_late_count(&events, january(), LATE_GRACE_MINUTES), 0);
    }

    #[test]
    fn test_unvalidated_check_in_does_not_count() {
        let events = vec![
            check_in("2026-01-15 10:30:00"),
            check_out("2026-01-15 17:00:00"),
        ];

        assert_eq!(validated_late_count(&events, january(), LATE_GRACE_MINUTES), 0);
    }

    #[test]
    fn test_validated_late_on_lone_check_in_does_not_count() {
        // Without a check-out the day never qualifies, so its validation
        // is not counted either.
        let events = vec![validated_check_in("2026-01-15 09:30:00", false, 30)];

        assert_eq!(validated_late_count(&events, january(), LATE_GRACE_MINUTES), 0);
    }
}
