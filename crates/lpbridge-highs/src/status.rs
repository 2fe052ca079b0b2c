//! Status conversions for the HiGHS integration.

use crate::ffi::HighsStatus;
use lpbridge_core::SolveStatus;

/// Translate a HiGHS model status into the four termination flags.
///
/// An inconclusive "unbounded or infeasible" verdict carries no certificate
/// for either side and is reported as abandoned.
pub(crate) fn highs_to_solve_status(status: HighsStatus) -> SolveStatus {
    match status {
        HighsStatus::Optimal | HighsStatus::Empty => SolveStatus::optimal(),
        HighsStatus::Infeasible => SolveStatus::primal_infeasible(),
        HighsStatus::Unbounded => SolveStatus::dual_infeasible(),
        HighsStatus::UnboundedOrInfeasible
        | HighsStatus::ReachedTimeLimit
        | HighsStatus::ReachedIterationLimit
        | HighsStatus::Error
        | HighsStatus::Unknown => SolveStatus::abandoned(),
    }
}

pub(crate) fn highs_status_string(status: HighsStatus) -> &'static str {
    match status {
        HighsStatus::Optimal => "optimal",
        HighsStatus::Empty => "empty",
        HighsStatus::Infeasible => "infeasible",
        HighsStatus::Unbounded => "unbounded",
        HighsStatus::UnboundedOrInfeasible => "unbounded_or_infeasible",
        HighsStatus::ReachedTimeLimit => "time_limit",
        HighsStatus::ReachedIterationLimit => "iteration_limit",
        HighsStatus::Error => "error",
        HighsStatus::Unknown => "unknown",
    }
}

/// Whether HiGHS produced primal values worth copying out.
pub(crate) fn highs_has_solution(status: HighsStatus) -> bool {
    matches!(
        status,
        HighsStatus::Optimal
            | HighsStatus::Empty
            | HighsStatus::ReachedTimeLimit
            | HighsStatus::ReachedIterationLimit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certified_statuses() {
        assert_eq!(
            highs_to_solve_status(HighsStatus::Optimal),
            SolveStatus::optimal()
        );
        assert_eq!(
            highs_to_solve_status(HighsStatus::Infeasible),
            SolveStatus::primal_infeasible()
        );
        assert_eq!(
            highs_to_solve_status(HighsStatus::Unbounded),
            SolveStatus::dual_infeasible()
        );
    }

    #[test]
    fn test_empty_model_is_optimal() {
        assert!(highs_to_solve_status(HighsStatus::Empty).is_optimal());
    }

    #[test]
    fn test_uncertified_statuses_are_abandoned() {
        for status in [
            HighsStatus::UnboundedOrInfeasible,
            HighsStatus::ReachedTimeLimit,
            HighsStatus::ReachedIterationLimit,
            HighsStatus::Error,
            HighsStatus::Unknown,
        ] {
            assert_eq!(
                highs_to_solve_status(status),
                SolveStatus::abandoned(),
                "{status:?} should be abandoned"
            );
        }
    }

    #[test]
    fn test_status_helpers() {
        assert!(highs_has_solution(HighsStatus::Optimal));
        assert!(highs_has_solution(HighsStatus::ReachedTimeLimit));
        assert!(!highs_has_solution(HighsStatus::Infeasible));
        assert!(!highs_has_solution(HighsStatus::Error));
        assert_eq!(
            highs_status_string(HighsStatus::UnboundedOrInfeasible),
            "unbounded_or_infeasible"
        );
        assert_eq!(highs_status_string(HighsStatus::Unknown), "unknown");
    }
}
