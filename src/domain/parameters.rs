// Solver configuration shared by every adapter

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Relative MIP gap applied when nothing else is configured
pub const DEFAULT_RELATIVE_GAP: f64 = 1e-7;

/// Engine-independent solver configuration.
///
/// Loadable from JSON (camelCase keys); missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SolverParameters {
    /// Print the engine's own log to the console
    pub enable_solver_output: bool,
    pub relative_gap: Option<f64>,
    /// Advisory to the engine, not a hard cancellation point
    pub time_limit_in_milliseconds: Option<u32>,
    /// `None` or `0` lets the engine decide
    pub number_of_threads: Option<u32>,
    /// Passed through verbatim, after the mapped keys
    pub additional_solver_specific_parameters: Vec<(String, String)>,
    /// Write the flattened model as MPS before solving
    pub export_model_file_path: Option<PathBuf>,
}

impl Default for SolverParameters {
    fn default() -> Self {
        Self {
            enable_solver_output: false,
            relative_gap: Some(DEFAULT_RELATIVE_GAP),
            time_limit_in_milliseconds: None,
            number_of_threads: None,
            additional_solver_specific_parameters: Vec::new(),
            export_model_file_path: None,
        }
    }
}

impl SolverParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_solver_output(mut self, enable: bool) -> Self {
        self.enable_solver_output = enable;
        self
    }

    pub fn with_relative_gap(mut self, gap: Option<f64>) -> Self {
        self.relative_gap = gap;
        self
    }

    pub fn with_time_limit_ms(mut self, milliseconds: u32) -> Self {
        self.time_limit_in_milliseconds = Some(milliseconds);
        self
    }

    pub fn with_threads(mut self, threads: u32) -> Self {
        self.number_of_threads = Some(threads);
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_solver_specific_parameters
            .push((key.into(), value.into()));
        self
    }

    pub fn with_export_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_model_file_path = Some(path.into());
        self
    }

    /// Time limit in seconds, the unit every engine expects
    pub fn time_limit_seconds(&self) -> Option<f64> {
        self.time_limit_in_milliseconds
            .map(|ms| f64::from(ms) / 1000.0)
    }

    /// Thread count, if one was requested
    pub fn threads(&self) -> Option<u32> {
        self.number_of_threads.filter(|&n| n > 0)
    }
}
