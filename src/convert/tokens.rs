//! Token stream representation of a corpus

use crate::error::{CorpusError, Result};
use crate::matrix::{degenerate_axes, zeroed_dense, CountMatrix, Degeneracy, DenseMatrix};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Parallel word-id / document-id arrays, one entry per token occurrence
///
/// `words[k]` is the vocabulary id of the k-th token and `docs[k]` the
/// document it belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenStream {
    pub words: Vec<usize>,
    pub docs: Vec<usize>,
}

impl TokenStream {
    /// Build from existing arrays, checking that their lengths match
    pub fn new(words: Vec<usize>, docs: Vec<usize>) -> Result<Self> {
        if words.len() != docs.len() {
            return Err(CorpusError::LengthMismatch {
                words: words.len(),
                docs: docs.len(),
            });
        }
        Ok(Self { words, docs })
    }

    /// Total number of tokens
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over `(word, doc)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.words.iter().copied().zip(self.docs.iter().copied())
    }

    /// Aggregate back into a document-term matrix
    pub fn to_matrix(&self) -> Result<DenseMatrix> {
        stream_to_matrix(&self.words, &self.docs)
    }
}

/// Expand a count matrix into a token stream
///
/// Every non-zero cell `(d, v)` with count `c` contributes a run of `c`
/// consecutive tokens. Runs follow the matrix's non-zero enumeration order.
/// All-zero rows or columns are reported as warnings but do not stop the
/// conversion.
pub fn matrix_to_stream<M: CountMatrix + ?Sized>(matrix: &M) -> TokenStream {
    matrix_to_stream_checked(matrix).0
}

/// [`matrix_to_stream`], also returning the degenerate axes it warned about
pub fn matrix_to_stream_checked<M: CountMatrix + ?Sized>(
    matrix: &M,
) -> (TokenStream, Vec<Degeneracy>) {
    let degeneracies = degenerate_axes(matrix);

    let n_tokens = matrix.total() as usize;
    let mut words = Vec::with_capacity(n_tokens);
    let mut docs = Vec::with_capacity(n_tokens);

    for (row, col, count) in matrix.nonzero() {
        let run = count as usize;
        words.extend(std::iter::repeat(col).take(run));
        docs.extend(std::iter::repeat(row).take(run));
    }

    debug!(tokens = words.len(), "expanded matrix into token stream");
    (TokenStream { words, docs }, degeneracies)
}

/// Aggregate a token stream into a dense document-term matrix
///
/// The shape is inferred as `(max(docs) + 1, max(words) + 1)`, so documents
/// or terms past the largest observed id cannot be recovered. Empty streams
/// give a 0×0 matrix. An id of `usize::MAX` or a shape too large to
/// allocate is an error.
pub fn stream_to_matrix(words: &[usize], docs: &[usize]) -> Result<DenseMatrix> {
    if words.len() != docs.len() {
        return Err(CorpusError::LengthMismatch {
            words: words.len(),
            docs: docs.len(),
        });
    }

    // First pass: dimensions
    let (n_docs, n_terms) = match (docs.iter().max(), words.iter().max()) {
        (Some(&max_doc), Some(&max_word)) => (axis_len(max_doc)?, axis_len(max_word)?),
        _ => (0, 0),
    };
    debug!(n_docs, n_terms, "inferred matrix shape from token stream");

    // Second pass: counts
    let mut matrix = zeroed_dense(n_docs, n_terms)?;
    for (&word, &doc) in words.iter().zip(docs) {
        matrix[[doc, word]] += 1;
    }

    Ok(matrix)
}

fn axis_len(max_index: usize) -> Result<usize> {
    max_index
        .checked_add(1)
        .ok_or(CorpusError::IndexOverflow { index: max_index })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::DegenerateAxis;
    use ndarray::array;
    use sprs::TriMat;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_matrix_to_stream_with_degenerate_axes() {
        let m: DenseMatrix = array![[0, 0], [1, 0]];
        let stream = matrix_to_stream(&m);

        assert_eq!(stream.words, vec![0]);
        assert_eq!(stream.docs, vec![1]);
    }

    #[test]
    fn test_matrix_to_stream_reports_degeneracies() {
        let m: DenseMatrix = array![[0, 0], [1, 0]];
        let (stream, found) = matrix_to_stream_checked(&m);

        assert_eq!(stream.words, vec![0]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].axis, DegenerateAxis::Rows);
        assert_eq!(found[0].indices, vec![0]);
        assert_eq!(found[1].axis, DegenerateAxis::Columns);
        assert_eq!(found[1].indices, vec![1]);

        let clean: DenseMatrix = array![[1]];
        assert!(matrix_to_stream_checked(&clean).1.is_empty());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_matrix_to_stream_logs_warnings() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let m: DenseMatrix = array![[0, 0], [1, 0]];
        tracing::subscriber::with_default(subscriber, || {
            matrix_to_stream(&m);
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("WARN").count(), 2);
        assert!(output.contains("all zero row"));
        assert!(output.contains("all zero column"));
    }

    #[test]
    fn test_matrix_to_stream_runs() {
        let m: DenseMatrix = array![[2, 0, 1], [0, 3, 0]];
        let stream = matrix_to_stream(&m);

        assert_eq!(stream.len(), 6);
        assert_eq!(stream.words, vec![0, 0, 2, 1, 1, 1]);
        assert_eq!(stream.docs, vec![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_matrix_to_stream_sparse() {
        let mut tri = TriMat::new((2, 2));
        tri.add_triplet(1, 1, 2u64);
        tri.add_triplet(0, 0, 1);
        let m: crate::matrix::SparseMatrix = tri.to_csr();

        let stream = matrix_to_stream(&m);
        assert_eq!(stream.words, vec![0, 1, 1]);
        assert_eq!(stream.docs, vec![0, 1, 1]);
    }

    #[test]
    fn test_matrix_to_stream_empty() {
        let zero = DenseMatrix::zeros((3, 2));
        assert!(matrix_to_stream(&zero).is_empty());

        let empty = DenseMatrix::zeros((0, 0));
        assert!(matrix_to_stream(&empty).is_empty());
    }

    #[test]
    fn test_stream_to_matrix_minimal_shape() {
        let m = stream_to_matrix(&[2, 0], &[0, 1]).unwrap();
        assert_eq!(m, array![[0, 0, 1], [1, 0, 0]]);
    }

    #[test]
    fn test_stream_to_matrix_counts_repeats() {
        let m = stream_to_matrix(&[1, 1, 0, 1], &[0, 0, 0, 1]).unwrap();
        assert_eq!(m, array![[1, 2], [0, 1]]);
    }

    #[test]
    fn test_stream_to_matrix_length_mismatch() {
        let err = stream_to_matrix(&[0, 1], &[0]).unwrap_err();
        assert!(matches!(
            err,
            CorpusError::LengthMismatch { words: 2, docs: 1 }
        ));
    }

    #[test]
    fn test_stream_to_matrix_index_overflow() {
        let err = stream_to_matrix(&[usize::MAX], &[0]).unwrap_err();
        assert!(matches!(err, CorpusError::IndexOverflow { index } if index == usize::MAX));

        let err = stream_to_matrix(&[0], &[usize::MAX]).unwrap_err();
        assert!(matches!(err, CorpusError::IndexOverflow { .. }));
    }

    #[test]
    fn test_stream_to_matrix_too_large() {
        let err = stream_to_matrix(&[1 << 62], &[0]).unwrap_err();
        assert!(matches!(err, CorpusError::MatrixTooLarge { rows: 1, .. }));
    }

    #[test]
    fn test_stream_to_matrix_empty() {
        let m = stream_to_matrix(&[], &[]).unwrap();
        assert_eq!(m.dim(), (0, 0));
    }

    #[test]
    fn test_token_stream_new_rejects_mismatch() {
        assert!(TokenStream::new(vec![0], vec![]).is_err());

        let stream = TokenStream::new(vec![3, 1], vec![0, 0]).unwrap();
        assert_eq!(stream.iter().collect::<Vec<_>>(), vec![(3, 0), (1, 0)]);
        assert_eq!(stream.to_matrix().unwrap(), array![[0, 1, 0, 1]]);
    }
}
