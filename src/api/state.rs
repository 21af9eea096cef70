//! Application state for the Payroll Computation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::runner::PayrollRunner;

/// Shared application state.
///
/// Wraps the payroll runner, which owns the collaborator interfaces and
/// the settings snapshot used to default omitted request rates.
#[derive(Clone)]
pub struct AppState {
    runner: Arc<PayrollRunner>,
}

impl AppState {
    /// Creates a new application state around the given runner.
    pub fn new(runner: PayrollRunner) -> Self {
        Self {
            runner: Arc::new(runner),
        }
    }

    /// Returns a reference to the payroll runner.
    pub fn runner(&self) -> &PayrollRunner {
        &self.runner
    }
}
