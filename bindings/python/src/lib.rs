//! Python bindings for lpbridge using PyO3.
//!
//! Mirrors the shape of a ctypes-style call: a coordinate-format matrix
//! tuple plus plain float lists in, a dict of flags and the solution out.

mod errors;
mod logging;
mod solve;

use pyo3::prelude::*;

pub(crate) type PyObject = Py<PyAny>;

pub use errors::{
    InvalidParameterError, InvalidProblemError, LpBridgeError, SolverInternalError,
};

/// The lpbridge Python module
#[pymodule]
fn lpbridge(m: &Bound<'_, PyModule>) -> PyResult<()> {
    errors::register(m)?;
    solve::register(m)?;
    logging::register(m)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
