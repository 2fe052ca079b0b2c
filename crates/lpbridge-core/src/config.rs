//! Solve parameters.

use crate::error::SolverError;
use std::str::FromStr;

/// Algorithm family the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SolveMode {
    /// Primal simplex.
    #[default]
    Primal,
    /// Dual simplex.
    Dual,
    /// Interior point (barrier).
    Barrier,
}

impl SolveMode {
    pub const PRIMAL_CODE: i32 = 0;
    pub const DUAL_CODE: i32 = 1;
    pub const BARRIER_CODE: i32 = 2;

    /// Look up a mode by its integer code (0 primal, 1 dual, 2 barrier).
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::PRIMAL_CODE => Some(SolveMode::Primal),
            Self::DUAL_CODE => Some(SolveMode::Dual),
            Self::BARRIER_CODE => Some(SolveMode::Barrier),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            SolveMode::Primal => Self::PRIMAL_CODE,
            SolveMode::Dual => Self::DUAL_CODE,
            SolveMode::Barrier => Self::BARRIER_CODE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolveMode::Primal => "primal",
            SolveMode::Dual => "dual",
            SolveMode::Barrier => "barrier",
        }
    }
}

impl std::fmt::Display for SolveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a mode name is not one of `primal`, `dual`, `barrier`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModeError(pub String);

impl std::fmt::Display for UnknownModeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown optimisation mode '{}' (expected 'primal', 'dual' or 'barrier')",
            self.0
        )
    }
}

impl std::error::Error for UnknownModeError {}

impl FromStr for SolveMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "primal" => Ok(SolveMode::Primal),
            "dual" => Ok(SolveMode::Dual),
            "barrier" | "ipm" => Ok(SolveMode::Barrier),
            _ => Err(UnknownModeError(s.to_string())),
        }
    }
}

/// Parameters for a single solve.
///
/// `mode` and `presolve` are always applied. The optional controls are
/// passed through to the engine only when set; `None` keeps the engine
/// default.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolveParams {
    pub mode: SolveMode,
    /// Let the engine reduce the problem before solving.
    pub presolve: bool,
    /// Time limit in seconds.
    pub time_limit: Option<f64>,
    /// Iteration limit for the selected algorithm.
    pub iteration_limit: Option<u32>,
    pub threads: Option<u32>,
    /// Primal and dual feasibility tolerance.
    pub tolerance: Option<f64>,
    pub verbosity: Option<u32>,
    /// Let the engine print its own log to the console.
    pub log_to_console: Option<bool>,
}

impl Default for SolveParams {
    fn default() -> Self {
        Self {
            mode: SolveMode::Primal,
            presolve: true,
            time_limit: None,
            iteration_limit: None,
            threads: None,
            tolerance: None,
            verbosity: None,
            log_to_console: None,
        }
    }
}

impl SolveParams {
    /// Smallest feasibility tolerance the engine accepts.
    pub const MIN_TOLERANCE: f64 = 1e-10;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: SolveMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_presolve(mut self, enabled: bool) -> Self {
        self.presolve = enabled;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    pub fn with_iteration_limit(mut self, iterations: u32) -> Self {
        self.iteration_limit = Some(iterations);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = Some(tol);
        self
    }

    pub fn with_verbosity(mut self, level: u32) -> Self {
        self.verbosity = Some(level);
        self
    }

    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    /// True when any pass-through control has been set.
    pub fn has_engine_overrides(&self) -> bool {
        self.time_limit.is_some()
            || self.iteration_limit.is_some()
            || self.threads.is_some()
            || self.tolerance.is_some()
            || self.verbosity.is_some()
            || self.log_to_console.is_some()
    }

    /// Check pass-through values against the ranges the engine accepts.
    ///
    /// NaN is rejected everywhere.
    pub fn validate(&self) -> Result<(), SolverError> {
        if let Some(seconds) = self.time_limit {
            if seconds.is_nan() || seconds < 0.0 {
                return Err(SolverError::InvalidParameter {
                    name: "time_limit",
                    value: seconds,
                });
            }
        }
        if let Some(tol) = self.tolerance {
            if tol.is_nan() || tol < Self::MIN_TOLERANCE {
                return Err(SolverError::InvalidParameter {
                    name: "tolerance",
                    value: tol,
                });
            }
        }
        Ok(())
    }
}
