//! Termination status reported by a solve.

/// Four independent flags describing how the engine terminated.
///
/// The flags are relayed exactly as the engine reports them; nothing here
/// enforces that at most one is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveStatus {
    /// The solve ended at a certified optimal point.
    pub proven_optimal: bool,
    /// The engine certified that no feasible point exists.
    pub proven_primal_infeasible: bool,
    /// The engine certified the dual infeasible (usually an unbounded primal).
    pub proven_dual_infeasible: bool,
    /// The solve stopped without a certificate either way.
    pub abandoned: bool,
}

impl SolveStatus {
    pub fn optimal() -> Self {
        Self {
            proven_optimal: true,
            ..Self::default()
        }
    }

    pub fn primal_infeasible() -> Self {
        Self {
            proven_primal_infeasible: true,
            ..Self::default()
        }
    }

    pub fn dual_infeasible() -> Self {
        Self {
            proven_dual_infeasible: true,
            ..Self::default()
        }
    }

    pub fn abandoned() -> Self {
        Self {
            abandoned: true,
            ..Self::default()
        }
    }

    pub fn is_optimal(self) -> bool {
        self.proven_optimal
    }

    /// True when either side was certified infeasible.
    pub fn is_infeasible(self) -> bool {
        self.proven_primal_infeasible || self.proven_dual_infeasible
    }

    pub fn is_abandoned(self) -> bool {
        self.abandoned
    }

    /// Short name of the first flag set, in optimal / primal / dual / abandoned order.
    pub fn as_str(self) -> &'static str {
        if self.proven_optimal {
            "optimal"
        } else if self.proven_primal_infeasible {
            "primal_infeasible"
        } else if self.proven_dual_infeasible {
            "dual_infeasible"
        } else if self.abandoned {
            "abandoned"
        } else {
            "unknown"
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_constructors() {
        assert!(SolveStatus::optimal().is_optimal());
        assert!(SolveStatus::primal_infeasible().is_infeasible());
        assert!(SolveStatus::dual_infeasible().is_infeasible());
        assert!(SolveStatus::abandoned().is_abandoned());
        assert!(!SolveStatus::abandoned().is_optimal());
    }

    #[test]
    fn test_status_default_has_no_flags() {
        let status = SolveStatus::default();
        assert!(!status.is_optimal());
        assert!(!status.is_infeasible());
        assert!(!status.is_abandoned());
        assert_eq!(status.as_str(), "unknown");
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(SolveStatus::optimal().as_str(), "optimal");
        assert_eq!(
            SolveStatus::primal_infeasible().as_str(),
            "primal_infeasible"
        );
        assert_eq!(SolveStatus::dual_infeasible().as_str(), "dual_infeasible");
        assert_eq!(SolveStatus::abandoned().as_str(), "abandoned");
    }

    #[test]
    fn test_status_flags_are_not_exclusive() {
        let status = SolveStatus {
            proven_primal_infeasible: true,
            proven_dual_infeasible: true,
            ..SolveStatus::default()
        };
        assert!(status.is_infeasible());
        assert_eq!(format!("{}", status), "primal_infeasible");
    }
}
