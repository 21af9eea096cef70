//! Settings loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for fetching the
//! salary settings record from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::SalarySettings;

/// Loads salary settings from a YAML file.
///
/// # File format
///
/// ```yaml
/// default_shift_rate: 200000
/// default_overtime_rate: 30000
/// late_penalty_per_occurrence: 50000
/// absence_penalty_per_day: 200000
/// ```
///
/// Fields may be omitted individually; omitted fields take their fallback
/// values. A missing file is not an error — the built-in defaults apply —
/// but a file that exists and fails to parse is.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::settings::SettingsLoader;
///
/// let settings = SettingsLoader::load("./config/salary_settings.yaml")?;
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SettingsLoader;

impl SettingsLoader {
    /// Loads settings from the given path, falling back to defaults when
    /// the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SettingsParse`] if the file exists but
    /// cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<SalarySettings> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(SalarySettings::default());
        }

        let path_str = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|e| EngineError::SettingsParse {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            EngineError::SettingsParse { message, .. } => EngineError::SettingsParse {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses settings from YAML content.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SettingsParse`] on malformed YAML.
    pub fn from_yaml(content: &str) -> EngineResult<SalarySettings> {
        serde_yaml::from_str(content).map_err(|e| EngineError::SettingsParse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }
}
