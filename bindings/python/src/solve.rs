//! Dict-returning `solve` entry point.

use lpbridge_core::{CooMatrix, LpProblem, Sense, SolveMode, SolveParams};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use tracing::debug;

use crate::errors::{InvalidProblemError, solver_error_to_py};

/// `((n_rows, n_cols), (row_indices, col_indices, coeffs))`
type CooArgs = ((usize, usize), (Vec<i64>, Vec<i64>, Vec<f64>));

fn to_indices(field: &str, raw: Vec<i64>) -> PyResult<Vec<usize>> {
    raw.into_iter()
        .enumerate()
        .map(|(entry, value)| {
            usize::try_from(value).map_err(|_| {
                InvalidProblemError::new_err(format!(
                    "{field}[{entry}] is negative ({value})"
                ))
            })
        })
        .collect()
}

/// Solve `min c'x` (or max) subject to `b_lo <= A x <= b_up`, `x_lo <= x <= x_up`.
///
/// `A` is given in coordinate form. Returns a dict with the four
/// termination flags, `x` (one value per column, NaN where the engine
/// produced none) and `objective_value`.
#[pyfunction]
#[pyo3(signature = (
    a, c, b_lo, b_up, x_lo, x_up,
    optimisation_mode="primal", presolve=true, maximize=false, time_limit=None
))]
#[allow(clippy::too_many_arguments)]
pub fn solve<'py>(
    py: Python<'py>,
    a: CooArgs,
    c: Vec<f64>,
    b_lo: Vec<f64>,
    b_up: Vec<f64>,
    x_lo: Vec<f64>,
    x_up: Vec<f64>,
    optimisation_mode: &str,
    presolve: bool,
    maximize: bool,
    time_limit: Option<f64>,
) -> PyResult<Bound<'py, PyDict>> {
    let ((n_rows, n_cols), (rows, cols, coeffs)) = a;
    let mode: SolveMode = optimisation_mode
        .parse()
        .map_err(|err| PyValueError::new_err(format!("{err}")))?;

    if rows.len() != coeffs.len() || cols.len() != coeffs.len() {
        return Err(InvalidProblemError::new_err(format!(
            "coordinate arrays differ in length: {} rows, {} cols, {} coeffs",
            rows.len(),
            cols.len(),
            coeffs.len()
        )));
    }
    let rows = to_indices("a_rows", rows)?;
    let cols = to_indices("a_cols", cols)?;

    let mut params = SolveParams::new().with_mode(mode).with_presolve(presolve);
    if let Some(seconds) = time_limit {
        params = params.with_time_limit(seconds);
    }
    let sense = if maximize {
        Sense::Maximize
    } else {
        Sense::Minimize
    };

    debug!(
        component = "python",
        operation = "solve",
        status = "success",
        n_rows,
        n_cols,
        n_entries = coeffs.len(),
        mode = %mode,
        presolve,
        "Received Python solve call"
    );

    let problem = LpProblem::new(
        CooMatrix::new(n_rows, n_cols, &rows, &cols, &coeffs),
        &c,
        &b_lo,
        &b_up,
        &x_lo,
        &x_up,
    )
    .with_sense(sense);
    let solution = lpbridge_highs::solve(&problem, &params).map_err(solver_error_to_py)?;
    let status = solution.status();

    let result = PyDict::new(py);
    result.set_item("proven_optimal", status.proven_optimal)?;
    result.set_item("proven_primal_infeasible", status.proven_primal_infeasible)?;
    result.set_item("proven_dual_infeasible", status.proven_dual_infeasible)?;
    result.set_item("abandoned", status.abandoned)?;
    result.set_item("status", status.as_str())?;
    result.set_item("objective_value", solution.objective_value())?;
    result.set_item("x", solution.primal_values().to_vec())?;
    Ok(result)
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(pyo3::wrap_pyfunction!(solve, m)?)?;
    Ok(())
}
