#![allow(unsafe_code)]
#![allow(non_camel_case_types)]

use libc::c_int;
use lpbridge_core::{SolveMode, SolveStatus};
use std::slice;

// The types defined here are for exchanging COO matrix data, parameters
// and termination flags with C callers. Layouts must match lpbridge.h.

pub const LPBRIDGE_USE_PRIMAL: c_int = SolveMode::PRIMAL_CODE;
pub const LPBRIDGE_USE_DUAL: c_int = SolveMode::DUAL_CODE;
pub const LPBRIDGE_USE_BARRIER: c_int = SolveMode::BARRIER_CODE;

/// Coordinate-format matrix borrowed from the caller.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct lpbridge_coo_matrix_t {
    pub n_rows: c_int,
    pub n_cols: c_int,
    pub n_entries: c_int,
    pub row_indices: *const c_int,
    pub col_indices: *const c_int,
    pub coeffs: *const f64,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct lpbridge_params_t {
    /// One of `LPBRIDGE_USE_PRIMAL`, `LPBRIDGE_USE_DUAL`, `LPBRIDGE_USE_BARRIER`.
    pub optimisation_mode: c_int,
    /// Non-zero enables presolve.
    pub presolve: c_int,
}

/// Termination flags, each 0 or 1.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct lpbridge_result_t {
    pub proven_optimal: c_int,
    pub proven_primal_infeasible: c_int,
    pub proven_dual_infeasible: c_int,
    pub abandoned: c_int,
}

impl From<SolveStatus> for lpbridge_result_t {
    fn from(status: SolveStatus) -> Self {
        Self {
            proven_optimal: c_int::from(status.proven_optimal),
            proven_primal_infeasible: c_int::from(status.proven_primal_infeasible),
            proven_dual_infeasible: c_int::from(status.proven_dual_infeasible),
            abandoned: c_int::from(status.abandoned),
        }
    }
}

/// Reasons a C call is rejected before reaching the engine.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CallError {
    NullPointer(&'static str),
    NegativeDimension { field: &'static str, value: c_int },
    NegativeIndex { field: &'static str, entry: usize },
    UnknownMode(c_int),
    Solver(lpbridge_core::SolverError),
    Panicked,
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallError::NullPointer(field) => write!(f, "{} is a null pointer", field),
            CallError::NegativeDimension { field, value } => {
                write!(f, "{} is negative ({})", field, value)
            }
            CallError::NegativeIndex { field, entry } => {
                write!(f, "{}[{}] is negative", field, entry)
            }
            CallError::UnknownMode(code) => write!(f, "unknown optimisation mode {}", code),
            CallError::Solver(err) => write!(f, "{}", err),
            CallError::Panicked => write!(f, "solver panicked"),
        }
    }
}

pub(crate) fn to_len(field: &'static str, value: c_int) -> Result<usize, CallError> {
    usize::try_from(value).map_err(|_| CallError::NegativeDimension { field, value })
}

/// Borrow `len` elements starting at `ptr`.
///
/// A zero length yields an empty slice whatever the pointer is.
///
/// # Safety
///
/// When `len > 0` and `ptr` is non-null, `ptr` must point to `len`
/// initialized elements that stay valid and unaliased by writers for `'a`.
pub(crate) unsafe fn borrow_slice<'a, T>(
    field: &'static str,
    ptr: *const T,
    len: usize,
) -> Result<&'a [T], CallError> {
    if len == 0 {
        return Ok(&[]);
    }
    if ptr.is_null() {
        return Err(CallError::NullPointer(field));
    }
    Ok(unsafe { slice::from_raw_parts(ptr, len) })
}

/// Mutable counterpart of [`borrow_slice`].
///
/// # Safety
///
/// When `len > 0` and `ptr` is non-null, `ptr` must point to `len` writable
/// elements not aliased elsewhere for `'a`.
pub(crate) unsafe fn borrow_slice_mut<'a, T>(
    field: &'static str,
    ptr: *mut T,
    len: usize,
) -> Result<&'a mut [T], CallError> {
    if len == 0 {
        return Ok(&mut []);
    }
    if ptr.is_null() {
        return Err(CallError::NullPointer(field));
    }
    Ok(unsafe { slice::from_raw_parts_mut(ptr, len) })
}

/// Convert C indices to `usize`, rejecting negatives.
pub(crate) fn to_indices(field: &'static str, raw: &[c_int]) -> Result<Vec<usize>, CallError> {
    raw.iter()
        .enumerate()
        .map(|(entry, &value)| {
            usize::try_from(value).map_err(|_| CallError::NegativeIndex { field, entry })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_from_status() {
        let result = lpbridge_result_t::from(SolveStatus::primal_infeasible());
        assert_eq!(
            result,
            lpbridge_result_t {
                proven_optimal: 0,
                proven_primal_infeasible: 1,
                proven_dual_infeasible: 0,
                abandoned: 0,
            }
        );
    }

    #[test]
    fn test_mode_constants_match_codes() {
        assert_eq!(SolveMode::from_code(LPBRIDGE_USE_PRIMAL), Some(SolveMode::Primal));
        assert_eq!(SolveMode::from_code(LPBRIDGE_USE_DUAL), Some(SolveMode::Dual));
        assert_eq!(SolveMode::from_code(LPBRIDGE_USE_BARRIER), Some(SolveMode::Barrier));
    }

    #[test]
    fn test_to_indices_rejects_negative() {
        assert_eq!(to_indices("row_indices", &[0, 2, 1]), Ok(vec![0, 2, 1]));
        assert_eq!(
            to_indices("row_indices", &[0, -1]),
            Err(CallError::NegativeIndex {
                field: "row_indices",
                entry: 1
            })
        );
    }

    #[test]
    fn test_to_len_rejects_negative() {
        assert_eq!(to_len("n_rows", 3), Ok(3));
        assert!(to_len("n_rows", -2).is_err());
    }

    #[test]
    fn test_borrow_slice_allows_null_when_empty() {
        let empty: Result<&[f64], _> = unsafe { borrow_slice("vec_c", std::ptr::null(), 0) };
        assert_eq!(empty, Ok(&[][..]));

        let missing: Result<&[f64], _> = unsafe { borrow_slice("vec_c", std::ptr::null(), 2) };
        assert_eq!(missing, Err(CallError::NullPointer("vec_c")));
    }
}
