//! [`CountMatrix`] for dense `ndarray` grids

use super::{CountMatrix, DenseMatrix};
use ndarray::Axis;

impl CountMatrix for DenseMatrix {
    fn dims(&self) -> (usize, usize) {
        self.dim()
    }

    fn total(&self) -> u64 {
        self.sum()
    }

    fn row_sums(&self) -> Vec<u64> {
        self.sum_axis(Axis(1)).to_vec()
    }

    fn col_sums(&self) -> Vec<u64> {
        self.sum_axis(Axis(0)).to_vec()
    }

    /// Row-major order
    fn nonzero(&self) -> Box<dyn Iterator<Item = (usize, usize, u64)> + '_> {
        Box::new(
            self.indexed_iter()
                .filter(|(_, &count)| count > 0)
                .map(|((row, col), &count)| (row, col, count)),
        )
    }

    fn row_entries(&self, row: usize) -> Vec<(usize, u64)> {
        self.row(row)
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .map(|(col, &count)| (col, count))
            .collect()
    }
}
