//! Shared problem and solver types for lpbridge.
//!
//! This crate describes a linear program in coordinate (COO) form together
//! with the parameters and termination flags of a solve. Engine backends
//! (like `lpbridge-highs`) consume these types.
//!
//! # Overview
//!
//! - [`CooMatrix`], [`LpProblem`]: borrowed problem data
//! - [`SolveParams`], [`SolveMode`]: strategy selection and engine controls
//! - [`SolveStatus`]: the four termination flags
//! - [`ProblemError`], [`SolverError`]: malformed input and adapter failures
//! - [`Solve`], [`SolutionView`]: traits implemented by backends

mod config;
mod error;
mod status;
mod traits;
pub mod types;

pub use config::{SolveMode, SolveParams, UnknownModeError};
pub use error::{ProblemError, SolverError};
pub use status::SolveStatus;
pub use traits::{SolutionView, Solve};
pub use types::{CooMatrix, CscMatrix, LpProblem, Sense};
