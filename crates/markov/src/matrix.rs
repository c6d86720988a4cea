//! Dense numeric matrices.

use serde::Serialize;

use crate::error::MarkovError;

/// A dense row-major matrix of reals.
///
/// Matrices here are small (a handful of fight states), so a flat `Vec` with
/// straightforward loops is all that is needed.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// A `rows x cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// The `n x n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.set(i, i, 1.0);
        }
        m
    }

    /// Builds a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::RaggedMatrix`] if the rows differ in length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MarkovError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MarkovError::RaggedMatrix {
                    row: i,
                    expected: cols,
                    got: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// One column, top to bottom.
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of bounds.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(
            col < self.cols,
            "column {col} out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        (0..self.rows).map(move |r| self.data[r * self.cols + col])
    }

    /// Sum of every column.
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.cols).map(|c| self.column(c).sum()).collect()
    }

    /// Nested rows, e.g. for serialisation.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Copies `block` into this matrix with its top-left corner at
    /// `(row, col)`.
    pub(crate) fn place(&mut self, row: usize, col: usize, block: &Matrix) {
        for r in 0..block.rows {
            for c in 0..block.cols {
                self.set(row + r, col + c, block.get(r, c));
            }
        }
    }

    /// Matrix product `self * rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::DimensionMismatch`] if the inner dimensions
    /// differ.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix, MarkovError> {
        if self.cols != rhs.rows {
            return Err(MarkovError::DimensionMismatch {
                what: "product inner dimension",
                expected: self.cols,
                got: rhs.rows,
            });
        }
        let mut out = Matrix::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self.get(i, k);
                if a == 0.0 {
                    continue;
                }
                for j in 0..rhs.cols {
                    out.data[i * rhs.cols + j] += a * rhs.get(k, j);
                }
            }
        }
        Ok(out)
    }

    /// Element-wise difference `self - rhs`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::DimensionMismatch`] if the shapes differ.
    pub fn difference(&self, rhs: &Matrix) -> Result<Matrix, MarkovError> {
        if self.rows != rhs.rows {
            return Err(MarkovError::DimensionMismatch {
                what: "difference rows",
                expected: self.rows,
                got: rhs.rows,
            });
        }
        if self.cols != rhs.cols {
            return Err(MarkovError::DimensionMismatch {
                what: "difference columns",
                expected: self.cols,
                got: rhs.cols,
            });
        }
        let data = self.data.iter().zip(&rhs.data).map(|(a, b)| a - b).collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

impl Serialize for Matrix {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}
