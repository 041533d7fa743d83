//! Pairwise distance matrix consumed by the best-match solvers.

use crate::error::{MatchingErrorKind, RecordDiffError, Result};
use serde::{Deserialize, Serialize};

/// Largest number of cells a matrix may hold.
pub const MAX_MATRIX_CELLS: usize = 1 << 26;

/// Dissimilarity scores indexed by `(index into list 1, index into list 2)`.
///
/// Entries may be missing: rows shorter than the widest row, `null` cells in
/// JSON input, or pairs never given to [`DistanceMatrix::from_entries`]. A
/// solver fails with [`MatchingErrorKind::MissingDistance`] only when it
/// actually needs such an entry. Present entries are always finite and
/// non-negative. Storage is dense, so `rows * columns` may not exceed
/// [`MAX_MATRIX_CELLS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Vec<Option<f64>>>",
    into = "Vec<Vec<Option<f64>>>"
)]
pub struct DistanceMatrix {
    rows: usize,
    columns: usize,
    cells: Vec<Option<f64>>,
}

impl DistanceMatrix {
    /// Build from dense rows. Rows may have different lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_optional_rows(
            rows.into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        )
    }

    /// Build from rows whose cells may be absent.
    pub fn from_optional_rows(rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut matrix = Self::empty(rows.len(), columns)?;
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                if let Some(distance) = cell {
                    matrix.set(r, c, distance)?;
                }
            }
        }
        Ok(matrix)
    }

    /// Build a sparse matrix from `((row, col), distance)` entries.
    pub fn from_entries(entries: impl IntoIterator<Item = ((usize, usize), f64)>) -> Result<Self> {
        let entries: Vec<_> = entries.into_iter().collect();
        let rows = entries
            .iter()
            .map(|((r, _), _)| r.saturating_add(1))
            .max()
            .unwrap_or(0);
        let columns = entries
            .iter()
            .map(|((_, c), _)| c.saturating_add(1))
            .max()
            .unwrap_or(0);
        let mut matrix = Self::empty(rows, columns)?;
        for ((r, c), distance) in entries {
            matrix.set(r, c, distance)?;
        }
        Ok(matrix)
    }

    /// Build a dense matrix by evaluating `f` for every cell.
    pub fn from_fn(
        rows: usize,
        columns: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self> {
        let mut matrix = Self::empty(rows, columns)?;
        for r in 0..rows {
            for c in 0..columns {
                matrix.set(r, c, f(r, c))?;
            }
        }
        Ok(matrix)
    }

    fn empty(rows: usize, columns: usize) -> Result<Self> {
        let size = rows
            .checked_mul(columns)
            .filter(|&size| size <= MAX_MATRIX_CELLS)
            .ok_or_else(|| {
                RecordDiffError::matching(
                    "building distance matrix",
                    MatchingErrorKind::MalformedMatrix(format!(
                        "{rows} x {columns} exceeds {MAX_MATRIX_CELLS} cells"
                    )),
                )
            })?;
        Ok(Self {
            rows,
            columns,
            cells: vec![None; size],
        })
    }

    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(RecordDiffError::matching(
                "building distance matrix",
                MatchingErrorKind::InvalidDistance { row, col, value },
            ));
        }
        self.cells[row * self.columns + col] = Some(value);
        Ok(())
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Distance for `(row, col)`, if present.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.columns {
            self.cells[row * self.columns + col]
        } else {
            None
        }
    }

    /// Distance for `(row, col)`, or a `MissingDistance` error.
    pub fn require(&self, row: usize, col: usize) -> Result<f64> {
        self.get(row, col).ok_or_else(|| {
            RecordDiffError::matching(
                "looking up pairwise distance",
                MatchingErrorKind::MissingDistance { row, col },
            )
        })
    }
}

impl TryFrom<Vec<Vec<Option<f64>>>> for DistanceMatrix {
    type Error = RecordDiffError;

    fn try_from(rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        Self::from_optional_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<Option<f64>>> {
    fn from(matrix: DistanceMatrix) -> Self {
        if matrix.columns == 0 {
            return vec![Vec::new(); matrix.rows];
        }
        matrix
            .cells
            .chunks(matrix.columns)
            .map(<[Option<f64>]>::to_vec)
            .collect()
    }
}
