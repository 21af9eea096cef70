//! Salary settings.
//!
//! This module defines the deployment-wide default rates read at
//! calculation time, and the loader that fetches them from a YAML file.
//! Exactly one settings record exists per deployment; when it is absent
//! the hardcoded fallback constants apply.

mod loader;

pub use loader::SettingsLoader;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fallback pay per working day.
pub const FALLBACK_SHIFT_RATE: Decimal = Decimal::from_parts(200_000, 0, 0, false, 0);

/// Fallback pay per overtime hour.
pub const FALLBACK_OVERTIME_RATE: Decimal = Decimal::from_parts(30_000, 0, 0, false, 0);

/// Fallback penalty per late occurrence.
pub const FALLBACK_LATE_PENALTY: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);

/// Fallback penalty per absence day.
pub const FALLBACK_ABSENCE_PENALTY: Decimal = Decimal::from_parts(200_000, 0, 0, false, 0);

/// Deployment-wide default rates, in the base currency unit.
///
/// Settings are fetched once per calculation call or batch run and passed
/// explicitly to the code that needs them; nothing in the engine caches
/// them globally, so an admin change takes effect on the next run.
///
/// # Example
///
/// ```
/// use payroll_engine::settings::SalarySettings;
/// use rust_decimal::Decimal;
///
/// let settings = SalarySettings::default();
/// assert_eq!(settings.default_shift_rate, Decimal::from(200_000));
/// assert_eq!(settings.default_overtime_rate, Decimal::from(30_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalarySettings {
    /// Pay per working day when no rate is entered manually.
    pub default_shift_rate: Decimal,
    /// Pay per overtime hour when no rate is entered manually.
    pub default_overtime_rate: Decimal,
    /// Penalty charged per late occurrence.
    pub late_penalty_per_occurrence: Decimal,
    /// Penalty charged per unexcused absence day.
    pub absence_penalty_per_day: Decimal,
}

impl Default for SalarySettings {
    fn default() -> Self {
        Self {
            default_shift_rate: FALLBACK_SHIFT_RATE,
            default_overtime_rate: FALLBACK_OVERTIME_RATE,
            late_penalty_per_occurrence: FALLBACK_LATE_PENALTY,
            absence_penalty_per_day: FALLBACK_ABSENCE_PENALTY,
        }
    }
}
