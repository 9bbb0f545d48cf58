//! Confusion-matrix construction.

/// A square matrix of expected-vs-observed outcome counts.
///
/// Indexed `[expected][observed]`; for this domain almost always the binary
/// form `[[hit, miss], [false_alarm, correct_rejection]]`. Entries are
/// non-negative counts stored as `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    cells: Vec<Vec<f64>>,
}

impl ConfusionMatrix {
    /// Build from parallel sequences of expected and observed class labels.
    ///
    /// The dimension is `max(distinct expected, distinct observed, 2)`; each
    /// `(expected, observed)` pair increments one cell.
    ///
    /// # Example
    ///
    /// ```
    /// use operant_eval::stats::ConfusionMatrix;
    ///
    /// let m = ConfusionMatrix::from_labels(&[0, 0, 1, 1], &[0, 1, 0, 1]);
    /// assert_eq!(m.n_classes(), 2);
    /// assert_eq!(m.get(0, 1), 1.0);
    /// ```
    #[must_use]
    pub fn from_labels(expected: &[usize], observed: &[usize]) -> Self {
        let distinct = |labels: &[usize]| {
            let mut sorted = labels.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            sorted.len()
        };
        let n = distinct(expected).max(distinct(observed)).max(2);
        let mut cells = vec![vec![0.0; n]; n];
        for (&exp, &obs) in expected.iter().zip(observed) {
            if exp < n && obs < n {
                cells[exp][obs] += 1.0;
            }
        }
        Self { cells }
    }

    /// Build from a literal pre-counted nested sequence.
    ///
    /// The matrix is squared up to `max(rows, longest row, 2)` with zero fill.
    #[must_use]
    pub fn from_counts(rows: &[Vec<f64>]) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let n = rows.len().max(width).max(2);
        let mut cells = vec![vec![0.0; n]; n];
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                cells[i][j] = v;
            }
        }
        Self { cells }
    }

    /// Build the binary 2x2 form directly.
    #[must_use]
    pub fn from_binary(m: [[f64; 2]; 2]) -> Self {
        Self {
            cells: vec![m[0].to_vec(), m[1].to_vec()],
        }
    }

    /// Matrix dimension.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.cells.len()
    }

    /// Whether this is the binary 2x2 form required by d-prime/bias/MCC.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.n_classes() == 2
    }

    /// Cell value at `[expected][observed]`.
    #[must_use]
    pub fn get(&self, expected: usize, observed: usize) -> f64 {
        self.cells[expected][observed]
    }

    /// Sum of one expectation row.
    #[must_use]
    pub fn row_sum(&self, expected: usize) -> f64 {
        self.cells[expected].iter().sum()
    }

    /// Sum of the main diagonal (correct predictions).
    #[must_use]
    pub fn trace(&self) -> f64 {
        (0..self.n_classes()).map(|i| self.cells[i][i]).sum()
    }

    /// Sum of all cells.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_counts_pairs() {
        let m = ConfusionMatrix::from_labels(&[0, 0, 0, 1, 1], &[0, 0, 1, 0, 1]);
        assert_eq!(m.get(0, 0), 2.0);
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(1, 0), 1.0);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.total(), 5.0);
    }

    #[test]
    fn test_from_labels_minimum_dimension_two() {
        let m = ConfusionMatrix::from_labels(&[0, 0], &[0, 0]);
        assert_eq!(m.n_classes(), 2);
        assert!(m.is_binary());
    }

    #[test]
    fn test_from_labels_grows_beyond_binary() {
        let m = ConfusionMatrix::from_labels(&[0, 1, 2], &[0, 1, 2]);
        assert_eq!(m.n_classes(), 3);
        assert!(!m.is_binary());
        assert_eq!(m.trace(), 3.0);
    }

    #[test]
    fn test_from_counts_squares_up() {
        let m = ConfusionMatrix::from_counts(&[vec![8.0, 2.0], vec![1.0, 9.0]]);
        assert_eq!(m.row_sum(0), 10.0);
        assert_eq!(m.row_sum(1), 10.0);
        assert_eq!(m.trace(), 17.0);
        assert_eq!(m.total(), 20.0);
    }
}
