//! Problem data: sparse constraint matrix, bound vectors and objective.

use crate::error::ProblemError;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Sense {
    #[default]
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Sparse matrix in coordinate format, borrowed from the caller.
///
/// Entry `k` is the triple `(row_indices[k], col_indices[k], values[k])`.
#[derive(Debug, Clone, Copy)]
pub struct CooMatrix<'a> {
    pub num_rows: usize,
    pub num_cols: usize,
    pub row_indices: &'a [usize],
    pub col_indices: &'a [usize],
    pub values: &'a [f64],
}

/// Column-major compressed copy of a [`CooMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct CscMatrix {
    pub num_rows: usize,
    pub num_cols: usize,
    /// Length `num_cols + 1`; column `j` occupies `col_ptrs[j]..col_ptrs[j + 1]`.
    pub col_ptrs: Vec<usize>,
    pub row_indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl<'a> CooMatrix<'a> {
    pub fn new(
        num_rows: usize,
        num_cols: usize,
        row_indices: &'a [usize],
        col_indices: &'a [usize],
        values: &'a [f64],
    ) -> Self {
        Self {
            num_rows,
            num_cols,
            row_indices,
            col_indices,
            values,
        }
    }

    /// A matrix with the given shape and no entries.
    pub fn empty(num_rows: usize, num_cols: usize) -> Self {
        Self::new(num_rows, num_cols, &[], &[], &[])
    }

    pub fn num_entries(&self) -> usize {
        self.values.len()
    }

    /// Check that the triple slices agree in length and every index is in range.
    pub fn validate(&self) -> Result<(), ProblemError> {
        let num_entries = self.values.len();
        if self.row_indices.len() != num_entries {
            return Err(ProblemError::DimensionMismatch {
                field: "row_indices",
                expected: num_entries,
                got: self.row_indices.len(),
            });
        }
        if self.col_indices.len() != num_entries {
            return Err(ProblemError::DimensionMismatch {
                field: "col_indices",
                expected: num_entries,
                got: self.col_indices.len(),
            });
        }
        for (entry, (&row, &col)) in self
            .row_indices
            .iter()
            .zip(self.col_indices.iter())
            .enumerate()
        {
            if row >= self.num_rows {
                return Err(ProblemError::RowIndexOutOfBounds {
                    entry,
                    index: row,
                    num_rows: self.num_rows,
                });
            }
            if col >= self.num_cols {
                return Err(ProblemError::ColumnIndexOutOfBounds {
                    entry,
                    index: col,
                    num_cols: self.num_cols,
                });
            }
        }
        Ok(())
    }

    /// Convert to column-major form.
    ///
    /// Entries are ordered by column, then row. Repeated `(row, col)` pairs
    /// are summed into a single entry. Call [`CooMatrix::validate`] first;
    /// out-of-range indices are a caller error here.
    pub fn to_csc(&self) -> CscMatrix {
        let mut order: Vec<usize> = (0..self.values.len()).collect();
        order.sort_by_key(|&k| (self.col_indices[k], self.row_indices[k]));

        let mut col_ptrs = vec![0usize; self.num_cols + 1];
        let mut row_indices = Vec::with_capacity(order.len());
        let mut values = Vec::with_capacity(order.len());
        let mut last: Option<(usize, usize)> = None;

        for k in order {
            let key = (self.col_indices[k], self.row_indices[k]);
            if last == Some(key) {
                if let Some(value) = values.last_mut() {
                    *value += self.values[k];
                }
                continue;
            }
            last = Some(key);
            col_ptrs[key.0 + 1] += 1;
            row_indices.push(key.1);
            values.push(self.values[k]);
        }

        for col in 0..self.num_cols {
            col_ptrs[col + 1] += col_ptrs[col];
        }

        CscMatrix {
            num_rows: self.num_rows,
            num_cols: self.num_cols,
            col_ptrs,
            row_indices,
            values,
        }
    }
}

impl CscMatrix {
    pub fn num_entries(&self) -> usize {
        self.values.len()
    }

    /// Row indices and values of column `col`.
    pub fn column(&self, col: usize) -> (&[usize], &[f64]) {
        let range = self.col_ptrs[col]..self.col_ptrs[col + 1];
        (&self.row_indices[range.clone()], &self.values[range])
    }
}

/// A linear program: minimize (or maximize) `objective · x` subject to
/// `row_lower <= A x <= row_upper` and `col_lower <= x <= col_upper`.
///
/// Infinite bounds mean the side is absent. Bounds with `lower > upper` are
/// accepted and left to the engine, which reports the problem infeasible.
#[derive(Debug, Clone, Copy)]
pub struct LpProblem<'a> {
    pub matrix: CooMatrix<'a>,
    pub objective: &'a [f64],
    pub row_lower: &'a [f64],
    pub row_upper: &'a [f64],
    pub col_lower: &'a [f64],
    pub col_upper: &'a [f64],
    pub sense: Sense,
}

impl<'a> LpProblem<'a> {
    pub fn new(
        matrix: CooMatrix<'a>,
        objective: &'a [f64],
        row_lower: &'a [f64],
        row_upper: &'a [f64],
        col_lower: &'a [f64],
        col_upper: &'a [f64],
    ) -> Self {
        Self {
            matrix,
            objective,
            row_lower,
            row_upper,
            col_lower,
            col_upper,
            sense: Sense::Minimize,
        }
    }

    pub fn with_sense(mut self, sense: Sense) -> Self {
        self.sense = sense;
        self
    }

    pub fn num_rows(&self) -> usize {
        self.matrix.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.matrix.num_cols
    }

    /// Check every vector against the matrix shape, then the matrix itself.
    pub fn validate(&self) -> Result<(), ProblemError> {
        let num_rows = self.matrix.num_rows;
        let num_cols = self.matrix.num_cols;
        let checks: [(&'static str, usize, usize); 5] = [
            ("objective", num_cols, self.objective.len()),
            ("row_lower", num_rows, self.row_lower.len()),
            ("row_upper", num_rows, self.row_upper.len()),
            ("col_lower", num_cols, self.col_lower.len()),
            ("col_upper", num_cols, self.col_upper.len()),
        ];
        for (field, expected, got) in checks {
            if expected != got {
                return Err(ProblemError::DimensionMismatch {
                    field,
                    expected,
                    got,
                });
            }
        }
        self.matrix.validate()?;

        tracing::trace!(
            component = "problem",
            operation = "validate",
            status = "success",
            num_rows,
            num_cols,
            num_entries = self.matrix.num_entries(),
            "Problem dimensions validated"
        );
        Ok(())
    }
}
