//! Thin wrapper over the HiGHS engine.
//!
//! This module contains unsafe code for reading solve info through the C API.
#![allow(unsafe_code)]

use highs::{ColProblem, HighsModelStatus, Model, Row, Sense as HighsSense, SolvedModel};
use highs_sys::HighsInt;
use std::ffi::{CStr, CString};
use std::fmt;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimize,
    Maximize,
}

/// Model status reported by HiGHS after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighsStatus {
    /// Optimal solution found
    Optimal,
    /// Model has no columns
    Empty,
    /// Problem is infeasible
    Infeasible,
    /// Problem is unbounded
    Unbounded,
    /// Presolve proved the problem is either unbounded or infeasible, but not which
    UnboundedOrInfeasible,
    /// Solver reached time limit
    ReachedTimeLimit,
    /// Solver reached iteration limit
    ReachedIterationLimit,
    /// HiGHS failed to load, presolve, solve or postsolve the model
    Error,
    /// Unknown status
    Unknown,
}

/// Errors returned by the HiGHS model wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighsModelError {
    RowCoefficientLengthMismatch { rows: usize, coefficients: usize },
    RowIndexOutOfBounds { row_index: usize, num_rows: usize },
    SolveRequired { operation: &'static str },
}

impl fmt::Display for HighsModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsModelError::RowCoefficientLengthMismatch { rows, coefficients } => write!(
                f,
                "rows length ({}) must match coefficients length ({})",
                rows, coefficients
            ),
            HighsModelError::RowIndexOutOfBounds {
                row_index,
                num_rows,
            } => write!(
                f,
                "row index {} out of bounds (num_rows = {})",
                row_index, num_rows
            ),
            HighsModelError::SolveRequired { operation } => {
                write!(f, "solve must be called before {}", operation)
            }
        }
    }
}

impl std::error::Error for HighsModelError {}

/// Snapshot of primal and dual solution values.
#[derive(Debug, Clone)]
pub struct SolutionSnapshot {
    col_values: Vec<f64>,
    col_duals: Vec<f64>,
    row_values: Vec<f64>,
    row_duals: Vec<f64>,
}

impl SolutionSnapshot {
    /// Primal values for variables.
    pub fn col_values(&self) -> &[f64] {
        &self.col_values
    }

    /// Dual values for variables (reduced costs).
    pub fn col_duals(&self) -> &[f64] {
        &self.col_duals
    }

    /// Row activities (A x).
    pub fn row_values(&self) -> &[f64] {
        &self.row_values
    }

    /// Dual values for constraints (shadow prices).
    pub fn row_duals(&self) -> &[f64] {
        &self.row_duals
    }

    pub(crate) fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.col_values, self.col_duals, self.row_values, self.row_duals)
    }
}

/// Column-wise HiGHS model.
///
/// Rows are declared first with their bounds; each column is then added
/// with its bounds, objective coefficient and the rows it touches.
pub struct HighsModel {
    problem: ColProblem,
    rows: Vec<Row>,
    num_columns: usize,
    objective_sense: ObjectiveSense,
    solved: Option<SolvedModel>,
    log_to_console: bool,
    options: Vec<(String, HighsOption)>,
    verbosity: Option<u32>,
}

impl HighsModel {
    pub fn new() -> Self {
        debug!(
            component = "solver",
            operation = "init_highs",
            status = "success",
            "Created empty column-wise model"
        );
        HighsModel {
            problem: ColProblem::default(),
            rows: Vec::new(),
            num_columns: 0,
            objective_sense: ObjectiveSense::Minimize,
            solved: None,
            log_to_console: false,
            options: Vec::new(),
            verbosity: None,
        }
    }

    /// Add a constraint row with the given bounds and no coefficients yet.
    ///
    /// Returns the index of the added row.
    pub fn add_row(&mut self, lower_bound: f64, upper_bound: f64) -> usize {
        trace!(
            lower_bound,
            upper_bound,
            component = "solver",
            operation = "add_row",
            status = "success",
            "Row added"
        );
        self.solved = None;
        let row = self.problem.add_row(lower_bound..=upper_bound);
        self.rows.push(row);
        self.rows.len() - 1
    }

    /// Add a continuous column with entries in previously added rows.
    ///
    /// Returns the column index. Fails when `rows` and `coefficients`
    /// differ in length or a row index has not been added.
    pub fn add_col(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        objective_coefficient: f64,
        rows: &[usize],
        coefficients: &[f64],
    ) -> Result<usize, HighsModelError> {
        if rows.len() != coefficients.len() {
            warn!(
                component = "solver",
                operation = "add_column",
                status = "error",
                rows = rows.len(),
                coefficients = coefficients.len(),
                "Row/coefficients length mismatch"
            );
            return Err(HighsModelError::RowCoefficientLengthMismatch {
                rows: rows.len(),
                coefficients: coefficients.len(),
            });
        }

        let num_rows = self.rows.len();
        let mut factors = Vec::with_capacity(rows.len());
        for (row_idx, coeff) in rows.iter().copied().zip(coefficients.iter().copied()) {
            let row = *self.rows.get(row_idx).ok_or_else(|| {
                warn!(
                    component = "solver",
                    operation = "add_column",
                    status = "error",
                    row_idx,
                    num_rows,
                    "Row index out of bounds for column"
                );
                HighsModelError::RowIndexOutOfBounds {
                    row_index: row_idx,
                    num_rows,
                }
            })?;
            factors.push((row, coeff));
        }

        trace!(
            lower_bound,
            upper_bound,
            objective_coefficient,
            num_coeffs = factors.len(),
            component = "solver",
            operation = "add_column",
            status = "success",
            "Column added"
        );
        self.solved = None;
        self.problem
            .add_column(objective_coefficient, lower_bound..=upper_bound, factors);
        self.num_columns += 1;
        Ok(self.num_columns - 1)
    }

    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        debug!(
            component = "solver",
            operation = "set_objective_sense",
            status = "success",
            ?sense,
            "Objective sense set"
        );
        self.objective_sense = sense;
    }

    /// Route engine output to the console on the next solve.
    pub fn set_log_to_console(&mut self, enabled: bool) {
        self.log_to_console = enabled;
    }

    /// Queue an engine option; queued options are consumed by [`Self::solve`].
    pub fn set_option(&mut self, option: impl Into<String>, value: HighsOption) {
        self.options.push((option.into(), value));
    }

    pub fn set_verbosity(&mut self, level: u32) {
        self.verbosity = Some(level);
    }

    /// Solve the model.
    ///
    /// The built problem is handed to HiGHS and the wrapper is left empty;
    /// rows and columns must be added again before another solve.
    pub fn solve(&mut self) -> HighsStatus {
        debug!(
            num_cols = self.problem.num_cols(),
            num_rows = self.problem.num_rows(),
            ?self.objective_sense,
            component = "solver",
            operation = "solve",
            status = "success",
            "Handing model to HiGHS"
        );

        let sense = match self.objective_sense {
            ObjectiveSense::Minimize => HighsSense::Minimise,
            ObjectiveSense::Maximize => HighsSense::Maximise,
        };

        let problem = std::mem::take(&mut self.problem);
        let options = self.pending_options();
        let status = match problem.try_optimise(sense) {
            Ok(mut model) => match apply_options(&mut model, options) {
                Ok(()) => match model.try_solve() {
                    Ok(solved) => {
                        let status = map_status(solved.status());
                        self.solved = Some(solved);
                        status
                    }
                    Err(err) => {
                        warn!(
                            component = "solver",
                            operation = "solve",
                            status = "error",
                            ?err,
                            "HiGHS run returned an error"
                        );
                        self.solved = None;
                        HighsStatus::Error
                    }
                },
                Err(option) => {
                    warn!(
                        component = "solver",
                        operation = "set_option",
                        status = "error",
                        option = %option,
                        "HiGHS rejected option value"
                    );
                    self.solved = None;
                    HighsStatus::Error
                }
            },
            Err(err) => {
                warn!(
                    component = "solver",
                    operation = "load_problem",
                    status = "error",
                    ?err,
                    "HiGHS rejected problem data"
                );
                self.solved = None;
                HighsStatus::Error
            }
        };

        trace!(
            component = "solver",
            operation = "solve",
            status = "success",
            ?status,
            "HiGHS model status mapped"
        );
        self.problem = ColProblem::default();
        self.rows.clear();
        self.num_columns = 0;
        self.verbosity = None;
        self.log_to_console = false;
        status
    }

    /// Options the next solve applies, console settings first.
    ///
    /// Engine output reaches the console when `log_to_console` is set or
    /// verbosity is positive; otherwise the model stays quiet.
    pub(crate) fn pending_options(&mut self) -> Vec<(String, HighsOption)> {
        let console = self.log_to_console || self.verbosity.is_some_and(|level| level > 0);
        let mut options = vec![
            ("output_flag".to_string(), HighsOption::Bool(console)),
            ("log_to_console".to_string(), HighsOption::Bool(console)),
        ];
        options.append(&mut self.options);
        options
    }

    /// Columns added since the last solve.
    pub fn columns(&self) -> usize {
        self.num_columns
    }

    /// Rows added since the last solve.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// True when the last solve produced an engine result to query.
    pub fn is_solved(&self) -> bool {
        self.solved.is_some()
    }

    /// Objective value of the last solve.
    pub fn objective_value(&self) -> Result<f64, HighsModelError> {
        let solved = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "objective_value",
        })?;
        Ok(solved.objective_value())
    }

    /// Simplex iterations of the last solve, 0 if unavailable.
    pub fn simplex_iteration_count(&self) -> u64 {
        self.get_int_info("simplex_iteration_count").unwrap_or(0)
    }

    /// Interior-point iterations of the last solve, 0 if unavailable.
    pub fn barrier_iteration_count(&self) -> u64 {
        self.get_int_info("ipm_iteration_count").unwrap_or(0)
    }

    fn get_int_info(&self, name: &str) -> Option<u64> {
        let solved = self.solved.as_ref()?;
        let c_name = CString::new(name).ok()?;
        let mut value: HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntInfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
        };
        if status != highs_sys::STATUS_OK {
            debug!(
                component = "solver",
                operation = "solve_info",
                info = name,
                status_code = status,
                "Info value not available"
            );
            return None;
        }
        if value < 0 {
            return None;
        }
        Some(value as u64)
    }

    /// Copy out primal and dual values of the last solve.
    pub fn solution_snapshot(&self) -> Result<SolutionSnapshot, HighsModelError> {
        let solution = self.solved.as_ref().ok_or(HighsModelError::SolveRequired {
            operation: "solution_snapshot",
        })?;
        let solution = solution.get_solution();

        Ok(SolutionSnapshot {
            col_values: solution.columns().to_vec(),
            col_duals: solution.dual_columns().to_vec(),
            row_values: solution.rows().to_vec(),
            row_duals: solution.dual_rows().to_vec(),
        })
    }
}

impl Default for HighsModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Typed value for a named engine option.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsOption {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

/// Apply options one by one, stopping at the first value HiGHS rejects.
///
/// Returns the name of the rejected option.
fn apply_options(model: &mut Model, options: Vec<(String, HighsOption)>) -> Result<(), String> {
    for (option, value) in options {
        trace!(
            component = "solver",
            operation = "set_option",
            status = "success",
            option = %option,
            ?value,
            "Applying HiGHS option"
        );
        let Ok(c_name) = CString::new(option.as_str()) else {
            return Err(option);
        };
        let highs = model.as_mut_ptr();
        let status = match &value {
            HighsOption::Bool(val) => unsafe {
                highs_sys::Highs_setBoolOptionValue(highs, c_name.as_ptr(), HighsInt::from(*val))
            },
            HighsOption::Int(val) => unsafe {
                highs_sys::Highs_setIntOptionValue(highs, c_name.as_ptr(), *val)
            },
            HighsOption::Float(val) => unsafe {
                highs_sys::Highs_setDoubleOptionValue(highs, c_name.as_ptr(), *val)
            },
            HighsOption::Str(val) => {
                let Ok(c_value) = CString::new(val.as_str()) else {
                    return Err(option);
                };
                unsafe {
                    highs_sys::Highs_setStringOptionValue(highs, c_name.as_ptr(), c_value.as_ptr())
                }
            }
        };
        if status == highs_sys::STATUS_ERROR {
            return Err(option);
        }
    }
    Ok(())
}

/// Version string of the linked HiGHS library.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
        }
    }
}

impl fmt::Debug for HighsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let objective_value = self.solved.as_ref().map(|s| s.objective_value());
        f.debug_struct("HighsModel")
            .field("num_variables", &self.num_columns)
            .field("num_constraints", &self.rows.len())
            .field("objective_sense", &self.objective_sense)
            .field("objective_value", &objective_value)
            .finish_non_exhaustive()
    }
}

fn map_status(status: HighsModelStatus) -> HighsStatus {
    match status {
        HighsModelStatus::Optimal => HighsStatus::Optimal,
        HighsModelStatus::ModelEmpty => HighsStatus::Empty,
        HighsModelStatus::Infeasible => HighsStatus::Infeasible,
        HighsModelStatus::Unbounded => HighsStatus::Unbounded,
        HighsModelStatus::UnboundedOrInfeasible => HighsStatus::UnboundedOrInfeasible,
        HighsModelStatus::ReachedTimeLimit => HighsStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => HighsStatus::ReachedIterationLimit,
        HighsModelStatus::LoadError
        | HighsModelStatus::ModelError
        | HighsModelStatus::PresolveError
        | HighsModelStatus::SolveError
        | HighsModelStatus::PostsolveError => HighsStatus::Error,
        _ => HighsStatus::Unknown,
    }
}
