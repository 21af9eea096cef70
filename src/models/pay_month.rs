//! Pay month model.
//!
//! This module contains the [`PayMonth`] type, the normalized
//! `(year, month)` key every salary record is scoped to.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A calendar month, normalized to the first day of the month.
///
/// Salary records are keyed on `(employee_id, PayMonth)`, and attendance
/// windows span `[first_day, last_day]` inclusive. The type parses from and
/// displays as `YYYY-MM`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayMonth;
/// use chrono::NaiveDate;
///
/// let month: PayMonth = "2026-02".parse().unwrap();
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// assert!(month.contains(NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()));
/// assert_eq!(month.to_string(), "2026-02");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct PayMonth(NaiveDate);

impl PayMonth {
    /// Creates a pay month from a year and a 1-based month number.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMonth`] if the month is outside `1..=12`
    /// or the year is outside the representable date range.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self)
            .ok_or_else(|| EngineError::InvalidMonth {
                value: format!("{year:04}-{month:02}"),
            })
    }

    /// Creates the pay month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Returns the first day of the month (the normalized key date).
    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Returns the last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.0
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.0)
    }

    /// Checks if a date falls within this month.
    ///
    /// The check is inclusive of both the first and the last day.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the 1-based month number.
    pub fn month(&self) -> u32 {
        self.0.month()
    }
}

impl fmt::Display for PayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m"))
    }
}

impl FromStr for PayMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| EngineError::InvalidMonth {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for PayMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayMonth> for String {
    fn from(month: PayMonth) -> Self {
        month.to_string()
    }
}
