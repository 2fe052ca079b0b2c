//! HiGHS backend for lpbridge.
//!
//! Converts a coordinate-format [`lpbridge_core::LpProblem`] into a
//! column-major HiGHS model, runs primal simplex, dual simplex or barrier,
//! and relays the solution and termination flags back to the caller.

pub mod ffi;
pub mod solution;
pub mod solver;
mod status;

pub use ffi::{
    HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense, SolutionSnapshot,
    highs_version,
};
pub use solution::Solution;
pub use solver::{Solver, solve, solve_into};
