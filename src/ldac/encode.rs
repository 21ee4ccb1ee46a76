//! Count matrix to LDA-C lines

use super::LdacConfig;
use crate::error::{CorpusError, Result};
use crate::matrix::CountMatrix;
use std::io::Write;
use tracing::info;

/// Lazy, single-pass sequence of LDA-C document lines
///
/// Rows are formatted one at a time as the iterator advances. After an
/// error the iterator is exhausted.
pub struct DocLines<'a, M: CountMatrix + ?Sized> {
    matrix: &'a M,
    next_row: usize,
    n_rows: usize,
    progress_every: usize,
    failed: bool,
}

impl<'a, M: CountMatrix + ?Sized> DocLines<'a, M> {
    fn new(matrix: &'a M, config: &LdacConfig) -> Self {
        Self {
            matrix,
            next_row: 0,
            n_rows: matrix.n_documents(),
            progress_every: config.progress_every,
            failed: false,
        }
    }

    /// Index of the next document to be formatted
    pub fn position(&self) -> usize {
        self.next_row
    }
}

impl<'a, M: CountMatrix + ?Sized> Iterator for DocLines<'a, M> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_row >= self.n_rows {
            return None;
        }

        let row = self.next_row;
        self.next_row += 1;

        let entries = self.matrix.row_entries(row);
        if entries.is_empty() {
            self.failed = true;
            return Some(Err(CorpusError::EmptyDocument { row }));
        }

        let line = format_line(&entries);

        if self.progress_every > 0 && self.next_row % self.progress_every == 0 {
            info!("to_ldac: on row {} of {}", self.next_row, self.n_rows);
        }

        Some(Ok(line))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.n_rows - self.next_row))
        }
    }
}

fn format_line(entries: &[(usize, u64)]) -> String {
    let pairs: Vec<String> = entries
        .iter()
        .map(|(term, count)| format!("{}:{}", term, count))
        .collect();
    format!("{} {}", entries.len(), pairs.join(" "))
}

/// Encode a count matrix as LDA-C lines with default options
///
/// Each advance reads one row through [`CountMatrix::row_entries`]. For a
/// CSC [`SparseMatrix`](crate::matrix::SparseMatrix) that scans every stored
/// entry, so wrap large CSC corpora in
/// [`DocTermMatrix::sparse`](crate::matrix::DocTermMatrix::sparse) first,
/// which converts them to CSR.
pub fn to_ldac<M: CountMatrix + ?Sized>(matrix: &M) -> DocLines<'_, M> {
    DocLines::new(matrix, &LdacConfig::default())
}

/// Encode a count matrix as LDA-C lines
///
/// Same row access cost as [`to_ldac`].
pub fn to_ldac_with<'a, M: CountMatrix + ?Sized>(
    matrix: &'a M,
    config: &LdacConfig,
) -> DocLines<'a, M> {
    DocLines::new(matrix, config)
}

/// Write every document line, newline-terminated, returning the number of
/// documents written
///
/// Lines before an empty document have already been written when the error
/// is returned.
pub fn write_ldac<M: CountMatrix + ?Sized, W: Write>(
    matrix: &M,
    writer: &mut W,
    config: &LdacConfig,
) -> Result<usize> {
    let mut written = 0;
    for line in to_ldac_with(matrix, config) {
        writeln!(writer, "{}", line?)?;
        written += 1;
    }
    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{DenseMatrix, DocTermMatrix, SparseMatrix};
    use ndarray::array;
    use sprs::TriMat;

    #[test]
    fn test_to_ldac_lines() {
        let m: DenseMatrix = array![[0, 2, 0, 1], [3, 0, 0, 0]];
        let lines: Vec<String> = to_ldac(&m).collect::<Result<_>>().unwrap();

        assert_eq!(lines, vec!["2 1:2 3:1", "1 0:3"]);
    }

    #[test]
    fn test_to_ldac_sparse_sorted_by_term() {
        let mut tri = TriMat::new((1, 6));
        tri.add_triplet(0, 5, 1u64);
        tri.add_triplet(0, 2, 4);
        let csc: SparseMatrix = tri.to_csc();

        let lines: Vec<String> = to_ldac(&csc).collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["2 2:4 5:1"]);
    }

    #[test]
    fn test_to_ldac_csc_through_csr_tag() {
        let mut tri = TriMat::new((2, 3));
        tri.add_triplet(1, 2, 2u64);
        tri.add_triplet(0, 1, 1);
        tri.add_triplet(1, 0, 5);
        let csc: SparseMatrix = tri.to_csc();

        let tagged = DocTermMatrix::sparse(csc);
        match &tagged {
            DocTermMatrix::Sparse(m) => assert!(m.is_csr()),
            DocTermMatrix::Dense(_) => panic!("expected sparse storage"),
        }

        let lines: Vec<String> = to_ldac(&tagged).collect::<Result<_>>().unwrap();
        assert_eq!(lines, vec!["1 1:1", "2 0:5 2:2"]);
    }

    #[test]
    fn test_to_ldac_empty_document_stops() {
        let m: DenseMatrix = array![[1, 0], [0, 0], [0, 1]];
        let mut lines = to_ldac(&m);

        assert_eq!(lines.next().unwrap().unwrap(), "1 0:1");
        match lines.next() {
            Some(Err(CorpusError::EmptyDocument { row })) => assert_eq!(row, 1),
            other => panic!("expected empty document error, got {:?}", other),
        }
        assert!(lines.next().is_none());
        assert_eq!(lines.position(), 2);
    }

    #[test]
    fn test_write_ldac() {
        let m: DenseMatrix = array![[1, 1], [0, 5]];
        let mut out = Vec::new();

        let written = write_ldac(&m, &mut out, &LdacConfig::default()).unwrap();
        assert_eq!(written, 2);
        assert_eq!(String::from_utf8(out).unwrap(), "2 0:1 1:1\n1 1:5\n");
    }

    #[test]
    fn test_write_ldac_partial_output_on_error() {
        let m: DenseMatrix = array![[2, 0], [0, 0]];
        let mut out = Vec::new();

        let err = write_ldac(&m, &mut out, &LdacConfig::default()).unwrap_err();
        assert!(matches!(err, CorpusError::EmptyDocument { row: 1 }));
        assert_eq!(String::from_utf8(out).unwrap(), "1 0:2\n");
    }

    #[test]
    fn test_progress_interval_does_not_change_output() {
        let m: DenseMatrix = array![[1], [2], [3]];
        let config = LdacConfig::new().progress_every(1);
        let lines: Vec<String> = to_ldac_with(&m, &config).collect::<Result<_>>().unwrap();

        assert_eq!(lines, vec!["1 0:1", "1 0:2", "1 0:3"]);
    }
}
