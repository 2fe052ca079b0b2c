#![allow(unsafe_code)]

use crate::types::*;
use libc::{c_char, c_int};
use lpbridge_core::{CooMatrix, LpProblem, SolveMode, SolveParams, SolveStatus};
use std::ffi::CString;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use tracing::{debug, warn};

static VERSION: OnceLock<CString> = OnceLock::new();

/// Solve an LP given in coordinate format.
///
/// Row bounds (`vec_b_lo`, `vec_b_up`) have `n_rows` entries; the objective
/// and column bounds (`vec_c`, `vec_x_lo`, `vec_x_up`) and the output
/// `vec_x_soln` have `n_cols` entries. On a completed call exactly `n_cols`
/// values are written to `vec_x_soln`. A rejected call (null pointer,
/// negative dimension or index, index out of range, unknown mode) sets only
/// `abandoned` and leaves `vec_x_soln` untouched.
///
/// # Safety
///
/// Every non-null pointer must reference an array of the length given
/// above, valid for the duration of the call, and `vec_x_soln` must not
/// overlap any input.
#[allow(clippy::too_many_arguments)]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lpbridge_solve(
    mat_a: *const lpbridge_coo_matrix_t,
    vec_c: *const f64,
    vec_b_lo: *const f64,
    vec_b_up: *const f64,
    vec_x_lo: *const f64,
    vec_x_up: *const f64,
    params: *const lpbridge_params_t,
    vec_x_soln: *mut f64,
) -> lpbridge_result_t {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| unsafe {
        solve_raw(
            mat_a, vec_c, vec_b_lo, vec_b_up, vec_x_lo, vec_x_up, params, vec_x_soln,
        )
    }))
    .unwrap_or(Err(CallError::Panicked));

    match outcome {
        Ok(status) => status.into(),
        Err(err) => {
            warn!(
                component = "capi",
                operation = "solve",
                status = "error",
                error = %err,
                "Rejected C solve call"
            );
            SolveStatus::abandoned().into()
        }
    }
}

/// HiGHS version string, or an empty string when unavailable.
///
/// The returned pointer is owned by the library and valid for its lifetime.
#[unsafe(no_mangle)]
pub extern "C" fn lpbridge_version() -> *const c_char {
    VERSION
        .get_or_init(|| {
            let version = lpbridge_highs::highs_version().unwrap_or_default();
            CString::new(version).unwrap_or_default()
        })
        .as_ptr()
}

#[allow(clippy::too_many_arguments)]
unsafe fn solve_raw(
    mat_a: *const lpbridge_coo_matrix_t,
    vec_c: *const f64,
    vec_b_lo: *const f64,
    vec_b_up: *const f64,
    vec_x_lo: *const f64,
    vec_x_up: *const f64,
    params: *const lpbridge_params_t,
    vec_x_soln: *mut f64,
) -> Result<SolveStatus, CallError> {
    let mat = unsafe { mat_a.as_ref() }.ok_or(CallError::NullPointer("mat_a"))?;
    let params = unsafe { params.as_ref() }.ok_or(CallError::NullPointer("params"))?;

    let n_rows = to_len("n_rows", mat.n_rows)?;
    let n_cols = to_len("n_cols", mat.n_cols)?;
    let n_entries = to_len("n_entries", mat.n_entries)?;
    let mode = SolveMode::from_code(params.optimisation_mode)
        .ok_or(CallError::UnknownMode(params.optimisation_mode))?;

    let row_indices: &[c_int] = unsafe { borrow_slice("row_indices", mat.row_indices, n_entries) }?;
    let col_indices: &[c_int] = unsafe { borrow_slice("col_indices", mat.col_indices, n_entries) }?;
    let coeffs = unsafe { borrow_slice("coeffs", mat.coeffs, n_entries) }?;
    let objective = unsafe { borrow_slice("vec_c", vec_c, n_cols) }?;
    let row_lower = unsafe { borrow_slice("vec_b_lo", vec_b_lo, n_rows) }?;
    let row_upper = unsafe { borrow_slice("vec_b_up", vec_b_up, n_rows) }?;
    let col_lower = unsafe { borrow_slice("vec_x_lo", vec_x_lo, n_cols) }?;
    let col_upper = unsafe { borrow_slice("vec_x_up", vec_x_up, n_cols) }?;
    let out = unsafe { borrow_slice_mut("vec_x_soln", vec_x_soln, n_cols) }?;

    let row_indices = to_indices("row_indices", row_indices)?;
    let col_indices = to_indices("col_indices", col_indices)?;

    debug!(
        component = "capi",
        operation = "solve",
        status = "success",
        n_rows,
        n_cols,
        n_entries,
        mode = %mode,
        presolve = params.presolve != 0,
        "Received C solve call"
    );

    let problem = LpProblem::new(
        CooMatrix::new(n_rows, n_cols, &row_indices, &col_indices, coeffs),
        objective,
        row_lower,
        row_upper,
        col_lower,
        col_upper,
    );
    let solve_params = SolveParams::new()
        .with_mode(mode)
        .with_presolve(params.presolve != 0);

    let (status, values) = lpbridge_highs::solve(&problem, &solve_params)
        .map_err(CallError::Solver)?
        .into_parts();
    out.copy_from_slice(&values);
    Ok(status)
}
