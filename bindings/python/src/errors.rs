//! Exception hierarchy rooted at `LpBridgeError`.

use lpbridge_core::SolverError;
use pyo3::exceptions::PyException;
use pyo3::prelude::*;

pyo3::create_exception!(
    lpbridge,
    LpBridgeError,
    PyException,
    "Base exception for all lpbridge errors."
);
pyo3::create_exception!(
    lpbridge,
    InvalidProblemError,
    LpBridgeError,
    "Problem data has inconsistent dimensions or out-of-range indices."
);
pyo3::create_exception!(
    lpbridge,
    InvalidParameterError,
    LpBridgeError,
    "A solve parameter is outside the range the engine accepts."
);
pyo3::create_exception!(
    lpbridge,
    SolverInternalError,
    LpBridgeError,
    "Internal solver error."
);

/// Convert a `SolverError` into the matching exception subclass.
pub fn solver_error_to_py(e: SolverError) -> PyErr {
    let msg = e.to_string();
    match e {
        SolverError::InvalidProblem(_) => InvalidProblemError::new_err(msg),
        SolverError::InvalidParameter { .. } => InvalidParameterError::new_err(msg),
        SolverError::InternalError(_) => SolverInternalError::new_err(msg),
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add("LpBridgeError", py.get_type::<LpBridgeError>())?;
    m.add("InvalidProblemError", py.get_type::<InvalidProblemError>())?;
    m.add("InvalidParameterError", py.get_type::<InvalidParameterError>())?;
    m.add("SolverInternalError", py.get_type::<SolverInternalError>())?;
    Ok(())
}
