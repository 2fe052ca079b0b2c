//! COO problem to HiGHS adapter.

use crate::ffi::{HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense};
use crate::solution::Solution;
use crate::status::{highs_has_solution, highs_status_string};
use lpbridge_core::{
    LpProblem, ProblemError, Sense, Solve, SolveMode, SolveParams, SolveStatus, SolverError,
};
use std::time::Instant;
use tracing::{debug, trace, warn};

/// HiGHS `simplex_strategy` value selecting dual simplex.
const SIMPLEX_STRATEGY_DUAL: i32 = 1;
/// HiGHS `simplex_strategy` value selecting primal simplex.
const SIMPLEX_STRATEGY_PRIMAL: i32 = 4;

fn highs_model_error_to_solver_error(err: HighsModelError) -> SolverError {
    SolverError::InternalError(err.to_string())
}

/// Solve `problem` and return the full solution.
///
/// # Errors
///
/// Returns `SolverError::InvalidProblem` when vector lengths disagree with the
/// matrix shape or an index is out of range, and
/// `SolverError::InvalidParameter` for an out-of-range time limit or
/// tolerance. Every engine outcome, including infeasible and abandoned
/// solves and data HiGHS refuses to load, is returned as `Ok` with the
/// matching status flags.
pub fn solve(problem: &LpProblem<'_>, params: &SolveParams) -> Result<Solution, SolverError> {
    if let Err(err) = problem.validate() {
        warn!(
            component = "solver",
            operation = "validate",
            status = "error",
            code = err.code(),
            error = %err,
            "Rejected malformed problem"
        );
        return Err(err.into());
    }
    if let Err(err) = params.validate() {
        warn!(
            component = "solver",
            operation = "validate",
            status = "error",
            code = err.code(),
            error = %err,
            "Rejected solve parameters"
        );
        return Err(err);
    }
    solve_validated(problem, params)
}

/// Solve `problem` and write one value per column into `out`.
///
/// `out` must have exactly `problem.num_cols()` entries. Its contents are
/// only meaningful when the returned status is optimal (or when an abandoned
/// solve stopped at a limit with a point in hand).
///
/// # Errors
///
/// Same as [`solve`], plus a dimension error when `out` has the wrong length.
pub fn solve_into(
    problem: &LpProblem<'_>,
    params: &SolveParams,
    out: &mut [f64],
) -> Result<SolveStatus, SolverError> {
    if out.len() != problem.num_cols() {
        return Err(ProblemError::DimensionMismatch {
            field: "solution buffer",
            expected: problem.num_cols(),
            got: out.len(),
        }
        .into());
    }
    let (status, values) = solve(problem, params)?.into_parts();
    out.copy_from_slice(&values);
    Ok(status)
}

/// Reusable HiGHS solver holding default parameters.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    params: SolveParams,
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: SolveParams) -> Self {
        Self { params }
    }

    fn update_params(&mut self, update: impl FnOnce(SolveParams) -> SolveParams) {
        self.params = update(std::mem::take(&mut self.params));
    }

    pub fn set_mode(&mut self, mode: SolveMode) {
        self.update_params(|params| params.with_mode(mode));
    }

    pub fn set_presolve(&mut self, enabled: bool) {
        self.update_params(|params| params.with_presolve(enabled));
    }

    /// Set a time limit in seconds for the next solve.
    pub fn set_time_limit(&mut self, seconds: f64) {
        self.update_params(|params| params.with_time_limit(seconds));
    }

    pub fn set_iteration_limit(&mut self, iterations: u32) {
        self.update_params(|params| params.with_iteration_limit(iterations));
    }

    pub fn set_threads(&mut self, threads: u32) {
        self.update_params(|params| params.with_threads(threads));
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.update_params(|params| params.with_tolerance(tolerance));
    }

    pub fn set_verbosity(&mut self, level: u32) {
        self.update_params(|params| params.with_verbosity(level));
    }

    pub fn set_log_to_console(&mut self, enabled: bool) {
        self.update_params(|params| params.with_log_to_console(enabled));
    }

    pub fn params(&self) -> &SolveParams {
        &self.params
    }

    /// Solve with the stored parameters.
    pub fn solve_problem(&self, problem: &LpProblem<'_>) -> Result<Solution, SolverError> {
        solve(problem, &self.params)
    }
}

impl Solve for Solver {
    type Solution = Solution;

    fn solve(
        &mut self,
        problem: &LpProblem<'_>,
        params: &SolveParams,
    ) -> Result<Self::Solution, SolverError> {
        solve(problem, params)
    }
}

fn apply_solve_params(highs_model: &mut HighsModel, params: &SolveParams) {
    match params.mode {
        SolveMode::Primal => {
            highs_model.set_option("solver", HighsOption::Str("simplex".to_string()));
            highs_model.set_option(
                "simplex_strategy",
                HighsOption::Int(SIMPLEX_STRATEGY_PRIMAL),
            );
        }
        SolveMode::Dual => {
            highs_model.set_option("solver", HighsOption::Str("simplex".to_string()));
            highs_model.set_option("simplex_strategy", HighsOption::Int(SIMPLEX_STRATEGY_DUAL));
        }
        SolveMode::Barrier => {
            highs_model.set_option("solver", HighsOption::Str("ipm".to_string()));
        }
    }

    let presolve = if params.presolve { "on" } else { "off" };
    highs_model.set_option("presolve", HighsOption::Str(presolve.to_string()));

    highs_model.set_log_to_console(params.log_to_console.unwrap_or(false));
    if let Some(limit) = params.time_limit {
        highs_model.set_option("time_limit", HighsOption::Float(limit));
    }
    if let Some(limit) = params.iteration_limit {
        let limit = i32::try_from(limit).unwrap_or(i32::MAX);
        let option = match params.mode {
            SolveMode::Barrier => "ipm_iteration_limit",
            SolveMode::Primal | SolveMode::Dual => "simplex_iteration_limit",
        };
        highs_model.set_option(option, HighsOption::Int(limit));
    }
    if let Some(level) = params.verbosity {
        highs_model.set_verbosity(level);
    }
    if let Some(threads) = params.threads {
        let threads = i32::try_from(threads).unwrap_or(i32::MAX);
        highs_model.set_option("threads", HighsOption::Int(threads));
    }
    if let Some(tolerance) = params.tolerance {
        highs_model.set_option(
            "primal_feasibility_tolerance",
            HighsOption::Float(tolerance),
        );
        highs_model.set_option("dual_feasibility_tolerance", HighsOption::Float(tolerance));
    }
}

/// Load rows, then columns in column-major order, into a fresh HiGHS model.
fn load_problem(problem: &LpProblem<'_>, highs_model: &mut HighsModel) -> Result<(), SolverError> {
    let build_started = Instant::now();

    for (lower, upper) in problem.row_lower.iter().zip(problem.row_upper.iter()) {
        highs_model.add_row(*lower, *upper);
    }

    let csc = problem.matrix.to_csc();
    for col in 0..csc.num_cols {
        let (rows, coefficients) = csc.column(col);
        highs_model
            .add_col(
                problem.col_lower[col],
                problem.col_upper[col],
                problem.objective[col],
                rows,
                coefficients,
            )
            .map_err(highs_model_error_to_solver_error)?;
    }

    debug!(
        component = "solver",
        operation = "load_problem",
        status = "success",
        num_rows = highs_model.rows(),
        num_cols = highs_model.columns(),
        num_entries = problem.matrix.num_entries(),
        num_merged_entries = csc.num_entries(),
        duration_ms = build_started.elapsed().as_secs_f64() * 1000.0,
        "Loaded problem into HiGHS"
    );
    Ok(())
}

/// Copy engine values into a vector of exactly `num_cols` entries.
fn fit_to_columns(values: Vec<f64>, num_cols: usize) -> Vec<f64> {
    if values.len() == num_cols {
        return values;
    }
    warn!(
        component = "solver",
        operation = "extract_solution",
        status = "warn",
        expected = num_cols,
        got = values.len(),
        "Engine returned a solution of unexpected length; padding with NaN"
    );
    let mut fitted = vec![f64::NAN; num_cols];
    for (slot, value) in fitted.iter_mut().zip(values) {
        *slot = value;
    }
    fitted
}

fn solve_validated(problem: &LpProblem<'_>, params: &SolveParams) -> Result<Solution, SolverError> {
    let solver_version = crate::ffi::highs_version().unwrap_or_else(|| "unknown".to_string());
    let solve_started = Instant::now();

    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "highs",
        solver_version = %solver_version,
        mode = %params.mode,
        presolve = params.presolve,
        engine_overrides = params.has_engine_overrides(),
        sense = problem.sense.as_str(),
        "Starting solve process"
    );

    let mut highs_model = HighsModel::new();
    apply_solve_params(&mut highs_model, params);
    highs_model.set_objective_sense(match problem.sense {
        Sense::Minimize => ObjectiveSense::Minimize,
        Sense::Maximize => ObjectiveSense::Maximize,
    });
    load_problem(problem, &mut highs_model)?;

    let status = highs_model.solve();
    let solve_ms = solve_started.elapsed().as_secs_f64() * 1000.0;
    let simplex_iterations = highs_model.simplex_iteration_count();
    let barrier_iterations = highs_model.barrier_iteration_count();

    let num_cols = problem.num_cols();
    let num_rows = problem.num_rows();
    let (primal_values, variable_duals, row_values, constraint_duals, objective_value) =
        match highs_model.solution_snapshot() {
            Ok(snapshot) => {
                let (col_values, col_duals, row_values, row_duals) = snapshot.into_parts();
                (
                    fit_to_columns(col_values, num_cols),
                    col_duals,
                    row_values,
                    row_duals,
                    highs_model.objective_value().unwrap_or(f64::NAN),
                )
            }
            Err(err) => {
                trace!(
                    component = "solver",
                    operation = "extract_solution",
                    status = "warn",
                    error = %err,
                    "No engine result; reporting NaN values"
                );
                (
                    vec![f64::NAN; num_cols],
                    vec![f64::NAN; num_cols],
                    vec![f64::NAN; num_rows],
                    vec![f64::NAN; num_rows],
                    f64::NAN,
                )
            }
        };

    let solution = Solution {
        primal_values,
        variable_duals,
        constraint_duals,
        row_values,
        objective_value,
        status,
        solve_time_seconds: solve_started.elapsed().as_secs_f64(),
        simplex_iterations,
        barrier_iterations,
    };

    if status == HighsStatus::Optimal || status == HighsStatus::Empty {
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            solver = "highs",
            solver_status = highs_status_string(status),
            simplex_iterations,
            barrier_iterations,
            objective_value,
            duration_ms = solve_ms,
            "HiGHS solve completed"
        );
    } else {
        warn!(
            component = "solver",
            operation = "solve",
            status = "warn",
            solver = "highs",
            solver_status = highs_status_string(status),
            flags = %solution.status(),
            has_solution = highs_has_solution(status),
            simplex_iterations,
            barrier_iterations,
            duration_ms = solve_ms,
            "Solver did not prove optimality"
        );
    }

    Ok(solution)
}
