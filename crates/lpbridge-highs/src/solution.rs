//! Solution type and trait implementations.

use crate::ffi::HighsStatus;
use crate::status::{highs_has_solution, highs_status_string, highs_to_solve_status};
use lpbridge_core::{SolutionView, SolveStatus};

/// Result of a HiGHS solve.
///
/// `primal_values` always holds one entry per column. When HiGHS produced no
/// values (for example after an engine error) the entries are `NaN`.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Primal values of variables indexed by column
    pub(crate) primal_values: Vec<f64>,
    /// Dual values of variables (reduced costs) indexed by column
    pub(crate) variable_duals: Vec<f64>,
    /// Dual values of constraints (shadow prices) indexed by row
    pub(crate) constraint_duals: Vec<f64>,
    /// Row activity values (A x evaluated at the solution)
    pub(crate) row_values: Vec<f64>,
    pub(crate) objective_value: f64,
    pub(crate) status: HighsStatus,
    pub(crate) solve_time_seconds: f64,
    pub(crate) simplex_iterations: u64,
    /// Interior-point iterations (0 if simplex was used)
    pub(crate) barrier_iterations: u64,
}

impl Solution {
    /// Get the primal value of a variable at the given index
    pub fn get_primal(&self, index: usize) -> Option<f64> {
        self.primal_values.get(index).copied()
    }

    /// Get the dual value (reduced cost) of a variable at the given index
    pub fn get_variable_dual(&self, index: usize) -> Option<f64> {
        self.variable_duals.get(index).copied()
    }

    /// Get the dual value (shadow price) of a constraint at the given index
    pub fn get_constraint_dual(&self, index: usize) -> Option<f64> {
        self.constraint_duals.get(index).copied()
    }

    pub fn objective_value(&self) -> f64 {
        self.objective_value
    }

    /// The four termination flags.
    pub fn status(&self) -> SolveStatus {
        highs_to_solve_status(self.status)
    }

    /// Get the HiGHS-specific status
    pub fn highs_status(&self) -> HighsStatus {
        self.status
    }

    pub fn primal_values(&self) -> &[f64] {
        &self.primal_values
    }

    pub fn variable_duals(&self) -> &[f64] {
        &self.variable_duals
    }

    pub fn constraint_duals(&self) -> &[f64] {
        &self.constraint_duals
    }

    pub fn row_values(&self) -> &[f64] {
        &self.row_values
    }

    pub fn solve_time_seconds(&self) -> f64 {
        self.solve_time_seconds
    }

    pub fn simplex_iterations(&self) -> u64 {
        self.simplex_iterations
    }

    pub fn barrier_iterations(&self) -> u64 {
        self.barrier_iterations
    }

    /// Get total iterations (simplex + barrier)
    pub fn total_iterations(&self) -> u64 {
        self.simplex_iterations + self.barrier_iterations
    }

    /// Whether HiGHS returned a usable point (optimal or stopped at a limit).
    pub fn has_solution(&self) -> bool {
        highs_has_solution(self.status)
    }

    /// Get solution status as a human-readable string
    pub fn status_string(&self) -> &'static str {
        highs_status_string(self.status)
    }

    /// Consume the solution, keeping only the flags and primal values.
    pub fn into_parts(self) -> (SolveStatus, Vec<f64>) {
        (self.status(), self.primal_values)
    }
}

impl SolutionView for Solution {
    fn status(&self) -> SolveStatus {
        Solution::status(self)
    }

    fn objective_value(&self) -> f64 {
        self.objective_value
    }

    fn primal_values(&self) -> &[f64] {
        &self.primal_values
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn fixture(status: HighsStatus) -> Solution {
        Solution {
            primal_values: vec![1.0, 2.0],
            variable_duals: vec![0.0, 0.5],
            constraint_duals: vec![-1.0],
            row_values: vec![3.0],
            objective_value: 5.0,
            status,
            solve_time_seconds: 0.01,
            simplex_iterations: 3,
            barrier_iterations: 2,
        }
    }

    #[test]
    fn test_accessors() {
        let solution = fixture(HighsStatus::Optimal);
        assert_eq!(solution.get_primal(1), Some(2.0));
        assert_eq!(solution.get_primal(2), None);
        assert_eq!(solution.get_variable_dual(1), Some(0.5));
        assert_eq!(solution.get_constraint_dual(0), Some(-1.0));
        assert_eq!(solution.row_values(), &[3.0]);
        assert_eq!(solution.total_iterations(), 5);
        assert_eq!(solution.status_string(), "optimal");
    }

    #[test]
    fn test_status_flags_follow_highs_status() {
        assert!(fixture(HighsStatus::Optimal).status().is_optimal());
        assert!(
            fixture(HighsStatus::Infeasible)
                .status()
                .proven_primal_infeasible
        );
        assert!(
            fixture(HighsStatus::Unbounded)
                .status()
                .proven_dual_infeasible
        );
        assert!(fixture(HighsStatus::ReachedTimeLimit).status().abandoned);
        assert!(fixture(HighsStatus::ReachedTimeLimit).has_solution());
    }

    #[test]
    fn test_solution_view_write_primal() {
        let solution = fixture(HighsStatus::Optimal);
        let mut out = [0.0; 2];
        SolutionView::write_primal(&solution, &mut out).unwrap();
        assert_eq!(out, [1.0, 2.0]);
    }

    #[test]
    fn test_into_parts() {
        let (status, values) = fixture(HighsStatus::Infeasible).into_parts();
        assert_eq!(status, SolveStatus::primal_infeasible());
        assert_eq!(values, vec![1.0, 2.0]);
    }
}
