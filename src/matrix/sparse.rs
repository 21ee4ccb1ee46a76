//! [`CountMatrix`] for `sprs` compressed matrices
//!
//! Explicitly stored zeros are treated as absent.

use super::{CountMatrix, SparseMatrix};

impl CountMatrix for SparseMatrix {
    fn dims(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    fn total(&self) -> u64 {
        self.data().iter().sum()
    }

    fn row_sums(&self) -> Vec<u64> {
        let mut sums = vec![0; self.rows()];
        for (&count, (row, _)) in self.iter() {
            sums[row] += count;
        }
        sums
    }

    fn col_sums(&self) -> Vec<u64> {
        let mut sums = vec![0; self.cols()];
        for (&count, (_, col)) in self.iter() {
            sums[col] += count;
        }
        sums
    }

    /// Storage order: row-major for CSR, column-major for CSC
    fn nonzero(&self) -> Box<dyn Iterator<Item = (usize, usize, u64)> + '_> {
        Box::new(
            self.iter()
                .filter(|&(&count, _)| count > 0)
                .map(|(&count, (row, col))| (row, col, count)),
        )
    }

    fn row_entries(&self, row: usize) -> Vec<(usize, u64)> {
        if self.is_csr() {
            return self
                .outer_view(row)
                .map(|view| {
                    view.iter()
                        .filter(|&(_, &count)| count > 0)
                        .map(|(col, &count)| (col, count))
                        .collect()
                })
                .unwrap_or_default();
        }

        // CSC: one row is spread over every column
        let mut entries: Vec<(usize, u64)> = self
            .iter()
            .filter(|&(&count, (r, _))| r == row && count > 0)
            .map(|(&count, (_, col))| (col, count))
            .collect();
        entries.sort_unstable_by_key(|&(col, _)| col);
        entries
    }
}
