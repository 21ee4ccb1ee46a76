//! Error types for corpus conversions

use thiserror::Error;

/// Errors that can occur while converting between corpus representations
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("document {row} has no non-zero term counts")]
    EmptyDocument { row: usize },

    #[error("line {line}: {kind}")]
    Format { line: usize, kind: FormatErrorKind },

    #[error("token streams differ in length: {words} word ids, {docs} document ids")]
    LengthMismatch { words: usize, docs: usize },

    #[error("index {index} is too large to size a matrix")]
    IndexOverflow { index: usize },

    #[error("a {rows}x{cols} dense matrix does not fit in memory")]
    MatrixTooLarge { rows: usize, cols: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Matrix shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// What went wrong on a malformed LDA-C line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("malformed term:count pair `{0}`")]
    MalformedPair(String),

    #[error("invalid integer `{0}`")]
    InvalidInteger(String),

    #[error("term id {0} is out of range")]
    TermIdOutOfRange(usize),

    #[error("term {0} appears more than once")]
    DuplicateTerm(usize),

    #[error("declared {declared} unique terms but found {found}")]
    TermCountMismatch { declared: usize, found: usize },
}

impl CorpusError {
    pub(crate) fn format(line: usize, kind: FormatErrorKind) -> Self {
        CorpusError::Format { line, kind }
    }

    /// The format error kind, if this is a decode failure
    pub fn format_kind(&self) -> Option<&FormatErrorKind> {
        match self {
            CorpusError::Format { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
