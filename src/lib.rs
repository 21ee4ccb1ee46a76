//! # Topic corpus conversions
//!
//! Converts a topic-modeling corpus between three representations:
//!
//! - a dense or sparse document-term count matrix ([`matrix`])
//! - parallel word-id / document-id token streams ([`convert`])
//! - the LDA-C bag-of-words text format ([`ldac`])
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use topic_corpus::prelude::*;
//!
//! let dtm: DenseMatrix = array![[2, 0, 1], [0, 1, 0]];
//!
//! let stream = matrix_to_stream(&dtm);
//! assert_eq!(stream.len(), 4);
//! assert_eq!(stream.to_matrix().unwrap(), dtm);
//!
//! let lines: Vec<String> = to_ldac(&dtm).collect::<Result<_>>().unwrap();
//! assert_eq!(lines, vec!["2 0:2 2:1", "1 1:1"]);
//! assert_eq!(from_ldac_str(&lines.join("\n")).unwrap(), dtm);
//! ```

pub mod convert;
pub mod error;
pub mod ldac;
pub mod matrix;
pub mod utils;

pub use convert::{matrix_to_stream, matrix_to_stream_checked, stream_to_matrix, TokenStream};
pub use error::{CorpusError, FormatErrorKind, Result};
pub use ldac::{
    from_ldac, from_ldac_sparse, from_ldac_str, from_ldac_with, to_ldac, to_ldac_with, write_ldac,
    DocLines, LdacConfig,
};
pub use matrix::{
    degenerate_axes, CountMatrix, Degeneracy, DegenerateAxis, DenseMatrix, DocTermMatrix,
    SparseMatrix,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::convert::{
        matrix_to_stream, matrix_to_stream_checked, stream_to_matrix, TokenStream,
    };
    pub use crate::error::{CorpusError, FormatErrorKind, Result};
    pub use crate::ldac::{
        from_ldac, from_ldac_sparse, from_ldac_str, from_ldac_with, to_ldac, to_ldac_with,
        write_ldac, LdacConfig,
    };
    pub use crate::matrix::{
        degenerate_axes, CountMatrix, DegenerateAxis, DenseMatrix, DocTermMatrix, SparseMatrix,
    };
}
