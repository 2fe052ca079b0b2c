//! Solver traits for abstraction over different engine backends.

use crate::{LpProblem, SolveParams, SolveStatus, SolverError};

/// Read access to the result of a solve.
pub trait SolutionView {
    /// Termination flags reported by the engine.
    fn status(&self) -> SolveStatus;

    /// Objective value at the returned point (`NaN` when the engine gave none).
    fn objective_value(&self) -> f64;

    /// One value per column.
    fn primal_values(&self) -> &[f64];

    /// Get the primal value at the given column.
    fn get_primal(&self, index: usize) -> Option<f64> {
        self.primal_values().get(index).copied()
    }

    fn is_optimal(&self) -> bool {
        self.status().is_optimal()
    }

    /// Copy the primal values into a caller buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` is not exactly one entry per column.
    fn write_primal(&self, out: &mut [f64]) -> Result<(), SolverError> {
        let values = self.primal_values();
        if out.len() != values.len() {
            return Err(crate::ProblemError::DimensionMismatch {
                field: "solution buffer",
                expected: values.len(),
                got: out.len(),
            }
            .into());
        }
        out.copy_from_slice(values);
        Ok(())
    }
}

/// An engine that can solve an [`LpProblem`].
pub trait Solve {
    type Solution: SolutionView;

    /// Solve the problem with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns a `SolverError` only when the problem is malformed or the
    /// engine cannot be driven. Infeasible, unbounded and abandoned solves
    /// are successful calls whose status says so.
    fn solve(
        &mut self,
        problem: &LpProblem<'_>,
        params: &SolveParams,
    ) -> Result<Self::Solution, SolverError>;
}
