//! Document-term count matrices
//!
//! Dense (`ndarray`) and sparse (`sprs`) matrices both implement
//! [`CountMatrix`], the capability set every conversion needs:
//! axis sums and an enumeration of non-zero cells.

pub mod dense;
pub mod sparse;

use crate::error::{CorpusError, Result};
use ndarray::Array2;
use sprs::CsMat;
use tracing::warn;

/// Dense D×V matrix of term counts
pub type DenseMatrix = Array2<u64>;

/// Sparse D×V matrix of term counts (CSR or CSC)
pub type SparseMatrix = CsMat<u64>;

/// Capabilities of a document-term count matrix
///
/// Rows are documents, columns are vocabulary terms.
pub trait CountMatrix {
    /// (documents, vocabulary size)
    fn dims(&self) -> (usize, usize);

    /// Sum of all cells, i.e. the number of tokens in the corpus
    fn total(&self) -> u64;

    /// Token count of every document
    fn row_sums(&self) -> Vec<u64>;

    /// Corpus frequency of every term
    fn col_sums(&self) -> Vec<u64>;

    /// Non-zero cells as `(row, column, count)`
    fn nonzero(&self) -> Box<dyn Iterator<Item = (usize, usize, u64)> + '_>;

    /// Non-zero `(column, count)` pairs of one row, in ascending column order
    fn row_entries(&self, row: usize) -> Vec<(usize, u64)>;

    /// Number of documents
    fn n_documents(&self) -> usize {
        self.dims().0
    }

    /// Vocabulary size
    fn n_terms(&self) -> usize {
        self.dims().1
    }
}

/// A count matrix tagged with its storage kind
#[derive(Debug, Clone)]
pub enum DocTermMatrix {
    Dense(DenseMatrix),
    Sparse(SparseMatrix),
}

impl DocTermMatrix {
    /// Wrap a sparse matrix, converting CSC storage to CSR so rows can be
    /// visited without scanning the whole matrix
    pub fn sparse(matrix: SparseMatrix) -> Self {
        if matrix.is_csc() {
            DocTermMatrix::Sparse(matrix.to_other_storage())
        } else {
            DocTermMatrix::Sparse(matrix)
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, DocTermMatrix::Sparse(_))
    }

    /// Materialize as a dense grid
    pub fn to_dense(&self) -> Result<DenseMatrix> {
        match self {
            DocTermMatrix::Dense(m) => Ok(m.clone()),
            DocTermMatrix::Sparse(m) => {
                let (rows, cols) = m.dims();
                let mut dense = zeroed_dense(rows, cols)?;
                for (row, col, count) in m.nonzero() {
                    dense[[row, col]] = count;
                }
                Ok(dense)
            }
        }
    }
}

impl From<DenseMatrix> for DocTermMatrix {
    fn from(matrix: DenseMatrix) -> Self {
        DocTermMatrix::Dense(matrix)
    }
}

impl From<SparseMatrix> for DocTermMatrix {
    fn from(matrix: SparseMatrix) -> Self {
        DocTermMatrix::sparse(matrix)
    }
}

impl CountMatrix for DocTermMatrix {
    fn dims(&self) -> (usize, usize) {
        match self {
            DocTermMatrix::Dense(m) => m.dims(),
            DocTermMatrix::Sparse(m) => m.dims(),
        }
    }

    fn total(&self) -> u64 {
        match self {
            DocTermMatrix::Dense(m) => CountMatrix::total(m),
            DocTermMatrix::Sparse(m) => CountMatrix::total(m),
        }
    }

    fn row_sums(&self) -> Vec<u64> {
        match self {
            DocTermMatrix::Dense(m) => m.row_sums(),
            DocTermMatrix::Sparse(m) => m.row_sums(),
        }
    }

    fn col_sums(&self) -> Vec<u64> {
        match self {
            DocTermMatrix::Dense(m) => m.col_sums(),
            DocTermMatrix::Sparse(m) => m.col_sums(),
        }
    }

    fn nonzero(&self) -> Box<dyn Iterator<Item = (usize, usize, u64)> + '_> {
        match self {
            DocTermMatrix::Dense(m) => m.nonzero(),
            DocTermMatrix::Sparse(m) => m.nonzero(),
        }
    }

    fn row_entries(&self, row: usize) -> Vec<(usize, u64)> {
        match self {
            DocTermMatrix::Dense(m) => m.row_entries(row),
            DocTermMatrix::Sparse(m) => m.row_entries(row),
        }
    }
}

/// Allocate a zeroed dense matrix, refusing shapes whose buffer could never
/// be allocated
///
/// Zero-length axes count as 1, the same way `ndarray` checks shapes.
pub fn zeroed_dense(rows: usize, cols: usize) -> Result<DenseMatrix> {
    let max_cells = isize::MAX as usize / std::mem::size_of::<u64>();
    match rows.max(1).checked_mul(cols.max(1)) {
        Some(cells) if cells <= max_cells => Ok(DenseMatrix::zeros((rows, cols))),
        _ => Err(CorpusError::MatrixTooLarge { rows, cols }),
    }
}

/// Which axis of the matrix has empty slices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegenerateAxis {
    /// Documents without any tokens
    Rows,
    /// Vocabulary terms no document uses
    Columns,
}

/// Non-fatal finding: some rows or columns of a count matrix sum to zero
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Degeneracy {
    pub axis: DegenerateAxis,
    /// Indices of the all-zero rows or columns
    pub indices: Vec<usize>,
}

/// Find all-zero rows and columns, logging a warning for each affected axis
///
/// At most one [`Degeneracy`] per axis is returned.
pub fn degenerate_axes<M: CountMatrix + ?Sized>(matrix: &M) -> Vec<Degeneracy> {
    let mut found = Vec::new();

    let zero_rows = zero_positions(&matrix.row_sums());
    if !zero_rows.is_empty() {
        warn!(
            count = zero_rows.len(),
            "all zero row in document-term matrix found"
        );
        found.push(Degeneracy {
            axis: DegenerateAxis::Rows,
            indices: zero_rows,
        });
    }

    let zero_cols = zero_positions(&matrix.col_sums());
    if !zero_cols.is_empty() {
        warn!(
            count = zero_cols.len(),
            "all zero column in document-term matrix found"
        );
        found.push(Degeneracy {
            axis: DegenerateAxis::Columns,
            indices: zero_cols,
        });
    }

    found
}

fn zero_positions(sums: &[u64]) -> Vec<usize> {
    sums.iter()
        .enumerate()
        .filter(|(_, &s)| s == 0)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use sprs::TriMat;

    #[test]
    fn test_degenerate_axes_both() {
        let m: DenseMatrix = array![[0, 0], [1, 0]];
        let found = degenerate_axes(&m);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].axis, DegenerateAxis::Rows);
        assert_eq!(found[0].indices, vec![0]);
        assert_eq!(found[1].axis, DegenerateAxis::Columns);
        assert_eq!(found[1].indices, vec![1]);
    }

    #[test]
    fn test_degenerate_axes_clean() {
        let m: DenseMatrix = array![[1, 0], [0, 2]];
        assert!(degenerate_axes(&m).is_empty());
    }

    #[test]
    fn test_degenerate_axes_empty_matrix() {
        let m = DenseMatrix::zeros((0, 0));
        assert!(degenerate_axes(&m).is_empty());
    }

    #[test]
    fn test_zeroed_dense_limits() {
        assert_eq!(zeroed_dense(2, 3).unwrap().dim(), (2, 3));
        assert_eq!(zeroed_dense(0, 5).unwrap().dim(), (0, 5));
        assert!(zeroed_dense(0, usize::MAX).is_err());

        assert!(matches!(
            zeroed_dense(1, 1 << 62),
            Err(CorpusError::MatrixTooLarge { rows: 1, .. })
        ));
        assert!(matches!(
            zeroed_dense(1 << 33, 1 << 33),
            Err(CorpusError::MatrixTooLarge { .. })
        ));
    }

    #[test]
    fn test_sparse_tag_converts_csc() {
        let mut tri = TriMat::new((2, 3));
        tri.add_triplet(0, 2, 4u64);
        tri.add_triplet(1, 0, 1);
        let csc: SparseMatrix = tri.to_csc();

        let tagged = DocTermMatrix::from(csc);
        match &tagged {
            DocTermMatrix::Sparse(m) => assert!(m.is_csr()),
            DocTermMatrix::Dense(_) => panic!("expected sparse storage"),
        }
        assert_eq!(tagged.to_dense().unwrap(), array![[0, 0, 4], [1, 0, 0]]);
    }

    #[test]
    fn test_tagged_dispatch_matches_dense() {
        let dense: DenseMatrix = array![[2, 0, 1], [0, 3, 0]];
        let tagged = DocTermMatrix::from(dense.clone());

        assert!(!tagged.is_sparse());
        assert_eq!(tagged.dims(), (2, 3));
        assert_eq!(tagged.total(), 6);
        assert_eq!(tagged.row_entries(0), vec![(0, 2), (2, 1)]);
        assert_eq!(tagged.n_documents(), 2);
        assert_eq!(tagged.n_terms(), 3);
    }
}
