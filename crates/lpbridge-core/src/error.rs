//! Error types for problem validation and solver plumbing.
//!
//! Engine outcomes (infeasible, unbounded, limits) are not errors; they are
//! reported through [`crate::SolveStatus`]. These types cover malformed input
//! and failures of the adapter itself.

/// A problem whose dimensions do not agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    /// A vector or buffer has the wrong length.
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    /// A matrix entry names a row that does not exist.
    RowIndexOutOfBounds {
        entry: usize,
        index: usize,
        num_rows: usize,
    },
    /// A matrix entry names a column that does not exist.
    ColumnIndexOutOfBounds {
        entry: usize,
        index: usize,
        num_cols: usize,
    },
}

impl ProblemError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ProblemError::DimensionMismatch { .. } => "PROBLEM_DIMENSION_MISMATCH",
            ProblemError::RowIndexOutOfBounds { .. } => "MATRIX_ROW_OUT_OF_BOUNDS",
            ProblemError::ColumnIndexOutOfBounds { .. } => "MATRIX_COLUMN_OUT_OF_BOUNDS",
        }
    }
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::DimensionMismatch {
                field,
                expected,
                got,
            } => write!(
                f,
                "[{}] {} has length {}, expected {}",
                self.code(),
                field,
                got,
                expected
            ),
            ProblemError::RowIndexOutOfBounds {
                entry,
                index,
                num_rows,
            } => write!(
                f,
                "[{}] entry {} has row index {} (num_rows = {})",
                self.code(),
                entry,
                index,
                num_rows
            ),
            ProblemError::ColumnIndexOutOfBounds {
                entry,
                index,
                num_cols,
            } => write!(
                f,
                "[{}] entry {} has column index {} (num_cols = {})",
                self.code(),
                entry,
                index,
                num_cols
            ),
        }
    }
}

impl std::error::Error for ProblemError {}

/// Error type for solver operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The problem failed validation before reaching the engine.
    InvalidProblem(ProblemError),
    /// A solve parameter is outside the range the engine accepts.
    InvalidParameter { name: &'static str, value: f64 },
    /// The adapter could not drive the engine.
    InternalError(String),
}

impl SolverError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::InvalidProblem(err) => err.code(),
            SolverError::InvalidParameter { .. } => "SOLVER_INVALID_PARAMETER",
            SolverError::InternalError(_) => "SOLVER_INTERNAL",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::InvalidProblem(err) => write!(f, "{}", err),
            SolverError::InvalidParameter { name, value } => write!(
                f,
                "[{}] Parameter {} is out of range ({})",
                self.code(),
                name,
                value
            ),
            SolverError::InternalError(msg) => {
                write!(f, "[{}] Solver internal error: {}", self.code(), msg)
            }
        }
    }
}

impl std::error::Error for SolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolverError::InvalidProblem(err) => Some(err),
            SolverError::InvalidParameter { .. } | SolverError::InternalError(_) => None,
        }
    }
}

impl From<ProblemError> for SolverError {
    fn from(err: ProblemError) -> Self {
        SolverError::InvalidProblem(err)
    }
}
