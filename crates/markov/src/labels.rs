//! Matrix input cells and symbolic display matrices.
//!
//! Explainer tables mix numbers with symbolic entries such as `"Q^k"`. Those
//! are kept apart: a [`LabelMatrix`] is display-only, and a numeric
//! [`Matrix`] is the only thing the solver accepts.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::MarkovError;
use crate::matrix::Matrix;

/// A single cell as written in a config file: a number or a label.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MatrixCell {
    /// A probability.
    Number(f64),
    /// A symbolic placeholder, or a number written as a string.
    Label(String),
}

impl MatrixCell {
    /// Numeric value of this cell.
    ///
    /// Numbers pass through; strings that parse as a float are used as
    /// numbers; any other label coerces to 0.
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Label(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        }
    }

    /// Display text of this cell.
    pub fn to_label(&self) -> String {
        match self {
            Self::Number(v) => v.to_string(),
            Self::Label(s) => s.clone(),
        }
    }

    fn is_symbolic(&self) -> bool {
        matches!(self, Self::Label(s) if s.trim().parse::<f64>().is_err())
    }
}

impl From<f64> for MatrixCell {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for MatrixCell {
    fn from(s: &str) -> Self {
        Self::Label(s.to_string())
    }
}

/// Coerces a grid of cells into a numeric matrix.
///
/// Symbolic labels become 0.
///
/// # Errors
///
/// Returns [`MarkovError::RaggedMatrix`] if the rows differ in length.
pub fn numeric_from_cells(cells: &[Vec<MatrixCell>]) -> Result<Matrix, MarkovError> {
    let rows: Vec<Vec<f64>> = cells
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, cell)| {
                    if cell.is_symbolic() {
                        debug!(row = r, col = c, label = %cell.to_label(), "symbolic cell coerced to 0");
                    }
                    cell.to_number()
                })
                .collect()
        })
        .collect();
    Matrix::from_rows(&rows)
}

/// A matrix of display strings for documentation tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelMatrix {
    rows: Vec<Vec<String>>,
}

impl LabelMatrix {
    /// Builds a label matrix from nested strings.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::RaggedMatrix`] if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, MarkovError> {
        let expected = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(MarkovError::RaggedMatrix {
                row,
                expected,
                got: r.len(),
            });
        }
        Ok(Self { rows })
    }

    /// Builds a label matrix from config cells, keeping labels verbatim and
    /// formatting numbers.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::RaggedMatrix`] if the rows differ in length.
    pub fn from_cells(cells: &[Vec<MatrixCell>]) -> Result<Self, MarkovError> {
        Self::from_rows(
            cells
                .iter()
                .map(|row| row.iter().map(MatrixCell::to_label).collect())
                .collect(),
        )
    }

    /// Formats a numeric matrix with `decimals` digits after the point.
    pub fn from_matrix(m: &Matrix, decimals: usize) -> Self {
        Self {
            rows: (0..m.rows())
                .map(|r| m.row(r).iter().map(|v| format!("{v:.decimals$}")).collect())
                .collect(),
        }
    }

    /// The canonical block layout `[[Q, O], [R, I]]`.
    pub fn block_form() -> Self {
        Self::power_form(1)
    }

    /// Block layout of `P^k`:
    /// `[[Q^k, O], [R(I + Q + ... + Q^(k-1)), I]]`.
    ///
    /// `k = 0` gives the identity layout.
    pub fn power_form(k: u32) -> Self {
        let (q, r) = match k {
            0 => ("I".to_string(), "O".to_string()),
            1 => ("Q".to_string(), "R".to_string()),
            2 => ("Q^2".to_string(), "R(I + Q)".to_string()),
            _ => (format!("Q^{k}"), format!("R(I + Q + ... + Q^{})", k - 1)),
        };
        Self {
            rows: vec![vec![q, "O".to_string()], vec![r, "I".to_string()]],
        }
    }

    /// Block layout of `lim P^k`: `[[O, O], [R N, I]]` with `N = (I - Q)^-1`.
    pub fn limit_form() -> Self {
        Self {
            rows: vec![
                vec!["O".to_string(), "O".to_string()],
                vec!["R N".to_string(), "I".to_string()],
            ],
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Label at `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_coercion() {
        assert_eq!(MatrixCell::from(0.4).to_number(), 0.4);
        assert_eq!(MatrixCell::from("0.25").to_number(), 0.25);
        assert_eq!(MatrixCell::from(" 1 ").to_number(), 1.0);
        assert_eq!(MatrixCell::from("Q^k").to_number(), 0.0);
        assert!(MatrixCell::from("Q^k").is_symbolic());
        assert!(!MatrixCell::from("0.5").is_symbolic());
        assert!(!MatrixCell::from(0.5).is_symbolic());
    }

    #[test]
    fn numeric_from_mixed_cells() {
        let cells = vec![
            vec![MatrixCell::from(0.6), MatrixCell::from("q01")],
            vec![MatrixCell::from("0.1"), MatrixCell::from(0.7)],
        ];
        let m = numeric_from_cells(&cells).unwrap();
        assert_eq!(m.to_rows(), vec![vec![0.6, 0.0], vec![0.1, 0.7]]);
    }

    #[test]
    fn numeric_from_ragged_cells() {
        let cells = vec![vec![MatrixCell::from(0.6)], vec![]];
        assert!(matches!(
            numeric_from_cells(&cells),
            Err(MarkovError::RaggedMatrix { row: 1, .. })
        ));
    }

    #[test]
    fn label_from_cells_keeps_text() {
        let cells = vec![vec![MatrixCell::from("Q^k"), MatrixCell::from(0.5)]];
        let l = LabelMatrix::from_cells(&cells).unwrap();
        assert_eq!(l.get(0, 0), Some("Q^k"));
        assert_eq!(l.get(0, 1), Some("0.5"));
        assert_eq!(l.get(1, 0), None);
    }

    #[test]
    fn label_from_matrix() {
        let m = Matrix::from_rows(&[[0.6, 0.0], [0.4, 1.0]]).unwrap();
        let l = LabelMatrix::from_matrix(&m, 2);
        assert_eq!(l.get(0, 0), Some("0.60"));
        assert_eq!(l.get(1, 1), Some("1.00"));
    }

    #[test]
    fn power_forms() {
        assert_eq!(LabelMatrix::block_form().get(0, 0), Some("Q"));
        assert_eq!(LabelMatrix::block_form().get(1, 0), Some("R"));
        assert_eq!(LabelMatrix::power_form(2).get(1, 0), Some("R(I + Q)"));
        let p5 = LabelMatrix::power_form(5);
        assert_eq!(p5.get(0, 0), Some("Q^5"));
        assert_eq!(p5.get(1, 0), Some("R(I + Q + ... + Q^4)"));
        assert_eq!(p5.get(0, 1), Some("O"));
        assert_eq!(p5.get(1, 1), Some("I"));
        assert_eq!(LabelMatrix::limit_form().get(1, 0), Some("R N"));
        assert_eq!((p5.rows(), p5.cols()), (2, 2));
    }

    #[test]
    fn deserialize_mixed_cells() {
        #[derive(Deserialize)]
        struct Doc {
            q: Vec<Vec<MatrixCell>>,
        }
        let doc: Doc = serde_json::from_str(r#"{"q": [[0.5, "Q^k"], ["0.1", 1]]}"#).unwrap();
        assert_eq!(doc.q[0][0], MatrixCell::Number(0.5));
        assert_eq!(doc.q[0][1], MatrixCell::Label("Q^k".to_string()));
        assert_eq!(doc.q[1][1], MatrixCell::Number(1.0));
    }
}
