#![allow(unsafe_code)]

use libc::c_int;
use lpbridge_c::{
    LPBRIDGE_USE_BARRIER, LPBRIDGE_USE_DUAL, LPBRIDGE_USE_PRIMAL, lpbridge_coo_matrix_t,
    lpbridge_params_t, lpbridge_result_t, lpbridge_solve, lpbridge_version,
};
use std::ffi::CStr;
use std::ptr;

const INF: f64 = f64::INFINITY;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// min -x - 2y  s.t.  x + y <= 4,  x + 3y <= 6,  x, y >= 0
struct TwoByTwo {
    rows: Vec<c_int>,
    cols: Vec<c_int>,
    coeffs: Vec<f64>,
    c: Vec<f64>,
    b_lo: Vec<f64>,
    b_up: Vec<f64>,
    x_lo: Vec<f64>,
    x_up: Vec<f64>,
}

impl TwoByTwo {
    fn new() -> Self {
        Self {
            rows: vec![0, 0, 1, 1],
            cols: vec![0, 1, 0, 1],
            coeffs: vec![1.0, 1.0, 1.0, 3.0],
            c: vec![-1.0, -2.0],
            b_lo: vec![-INF, -INF],
            b_up: vec![4.0, 6.0],
            x_lo: vec![0.0, 0.0],
            x_up: vec![INF, INF],
        }
    }

    fn matrix(&self) -> lpbridge_coo_matrix_t {
        lpbridge_coo_matrix_t {
            n_rows: 2,
            n_cols: 2,
            n_entries: self.coeffs.len() as c_int,
            row_indices: self.rows.as_ptr(),
            col_indices: self.cols.as_ptr(),
            coeffs: self.coeffs.as_ptr(),
        }
    }

    fn solve(
        &self,
        mat: &lpbridge_coo_matrix_t,
        params: &lpbridge_params_t,
        out: &mut [f64],
    ) -> lpbridge_result_t {
        unsafe {
            lpbridge_solve(
                mat,
                self.c.as_ptr(),
                self.b_lo.as_ptr(),
                self.b_up.as_ptr(),
                self.x_lo.as_ptr(),
                self.x_up.as_ptr(),
                params,
                out.as_mut_ptr(),
            )
        }
    }
}

fn params(mode: c_int, presolve: c_int) -> lpbridge_params_t {
    lpbridge_params_t {
        optimisation_mode: mode,
        presolve,
    }
}

fn abandoned() -> lpbridge_result_t {
    lpbridge_result_t {
        abandoned: 1,
        ..Default::default()
    }
}

#[test]
fn test_every_mode_reaches_optimum() {
    init_tracing();
    let lp = TwoByTwo::new();
    let mat = lp.matrix();
    for mode in [LPBRIDGE_USE_PRIMAL, LPBRIDGE_USE_DUAL, LPBRIDGE_USE_BARRIER] {
        for presolve in [0, 1] {
            let mut x = [f64::NAN; 2];
            let result = lp.solve(&mat, &params(mode, presolve), &mut x);
            assert_eq!(result.proven_optimal, 1, "mode {mode} presolve {presolve}");
            assert_eq!(result.abandoned, 0);
            assert!((x[0] - 3.0).abs() < 1e-6, "x = {:?}", x);
            assert!((x[1] - 1.0).abs() < 1e-6, "x = {:?}", x);
        }
    }
}

#[test]
fn test_inverted_column_bounds_are_infeasible() {
    let mut lp = TwoByTwo::new();
    lp.x_lo = vec![1.0, 0.0];
    lp.x_up = vec![0.0, INF];
    let mut x = [0.0; 2];
    let result = lp.solve(&lp.matrix(), &params(LPBRIDGE_USE_DUAL, 1), &mut x);
    assert_eq!(result.proven_primal_infeasible, 1);
    assert_eq!(result.proven_optimal, 0);
}

#[test]
fn test_null_objective_is_abandoned_and_buffer_untouched() {
    init_tracing();
    let lp = TwoByTwo::new();
    let mat = lp.matrix();
    let p = params(LPBRIDGE_USE_PRIMAL, 1);
    let mut x = [7.0; 2];
    let result = unsafe {
        lpbridge_solve(
            &mat,
            ptr::null(),
            lp.b_lo.as_ptr(),
            lp.b_up.as_ptr(),
            lp.x_lo.as_ptr(),
            lp.x_up.as_ptr(),
            &p,
            x.as_mut_ptr(),
        )
    };
    assert_eq!(result, abandoned());
    assert_eq!(x, [7.0; 2]);
}

#[test]
fn test_null_matrix_is_abandoned() {
    let lp = TwoByTwo::new();
    let p = params(LPBRIDGE_USE_PRIMAL, 1);
    let mut x = [7.0; 2];
    let result = unsafe {
        lpbridge_solve(
            ptr::null(),
            lp.c.as_ptr(),
            lp.b_lo.as_ptr(),
            lp.b_up.as_ptr(),
            lp.x_lo.as_ptr(),
            lp.x_up.as_ptr(),
            &p,
            x.as_mut_ptr(),
        )
    };
    assert_eq!(result, abandoned());
    assert_eq!(x, [7.0; 2]);
}

#[test]
fn test_unknown_mode_is_abandoned() {
    init_tracing();
    let lp = TwoByTwo::new();
    let mut x = [7.0; 2];
    let result = lp.solve(&lp.matrix(), &params(9, 1), &mut x);
    assert_eq!(result, abandoned());
    assert_eq!(x, [7.0; 2]);
}

#[test]
fn test_negative_index_is_abandoned() {
    init_tracing();
    let mut lp = TwoByTwo::new();
    lp.rows[2] = -1;
    let mut x = [7.0; 2];
    let result = lp.solve(&lp.matrix(), &params(LPBRIDGE_USE_PRIMAL, 1), &mut x);
    assert_eq!(result, abandoned());
    assert_eq!(x, [7.0; 2]);
}

#[test]
fn test_out_of_range_column_is_abandoned() {
    let mut lp = TwoByTwo::new();
    lp.cols[3] = 2;
    let mut x = [7.0; 2];
    let result = lp.solve(&lp.matrix(), &params(LPBRIDGE_USE_PRIMAL, 1), &mut x);
    assert_eq!(result, abandoned());
    assert_eq!(x, [7.0; 2]);
}

#[test]
fn test_no_constraints() {
    // min x with 1 <= x <= 2 and no rows
    let c = [1.0];
    let x_lo = [1.0];
    let x_up = [2.0];
    let mat = lpbridge_coo_matrix_t {
        n_rows: 0,
        n_cols: 1,
        n_entries: 0,
        row_indices: ptr::null(),
        col_indices: ptr::null(),
        coeffs: ptr::null(),
    };
    let p = params(LPBRIDGE_USE_PRIMAL, 0);
    let mut x = [0.0];
    let result = unsafe {
        lpbridge_solve(
            &mat,
            c.as_ptr(),
            ptr::null(),
            ptr::null(),
            x_lo.as_ptr(),
            x_up.as_ptr(),
            &p,
            x.as_mut_ptr(),
        )
    };
    assert_eq!(result.proven_optimal, 1);
    assert!((x[0] - 1.0).abs() < 1e-9);
}

#[test]
fn test_version_is_non_null() {
    let version = lpbridge_version();
    assert!(!version.is_null());
    let text = unsafe { CStr::from_ptr(version) };
    assert!(text.to_str().is_ok());
    // Pointer is stable across calls.
    assert_eq!(version, lpbridge_version());
}
