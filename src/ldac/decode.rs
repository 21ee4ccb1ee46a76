//! LDA-C text to count matrix

use super::LdacConfig;
use crate::error::{CorpusError, FormatErrorKind, Result};
use crate::matrix::{zeroed_dense, DenseMatrix, SparseMatrix};
use hashbrown::HashMap;
use sprs::TriMat;
use std::io::BufRead;
use tracing::debug;

type ParseResult<T> = std::result::Result<T, FormatErrorKind>;

/// One parsed document line
struct ParsedDoc {
    /// 1-based line number in the source
    line: usize,
    pairs: Vec<(usize, u64)>,
}

/// Decode LDA-C text into a dense matrix with default options
pub fn from_ldac<R: BufRead>(reader: R) -> Result<DenseMatrix> {
    from_ldac_with(reader, &LdacConfig::default())
}

/// Decode LDA-C text held in memory
pub fn from_ldac_str(text: &str) -> Result<DenseMatrix> {
    from_ldac(text.as_bytes())
}

/// Decode LDA-C text into a dense matrix
///
/// The matrix has one row per non-blank line and `max(term) + 1` columns.
/// A term repeated within a line is a format error. Shapes too large to
/// allocate fail with [`CorpusError::MatrixTooLarge`].
pub fn from_ldac_with<R: BufRead>(reader: R, config: &LdacConfig) -> Result<DenseMatrix> {
    let docs = parse_documents(reader, config)?;
    let n_terms = vocabulary_size(&docs);
    debug!(n_docs = docs.len(), n_terms, "decoded LDA-C shape");

    let mut matrix = zeroed_dense(docs.len(), n_terms)?;
    for (row, doc) in docs.iter().enumerate() {
        for &(term, count) in &doc.pairs {
            let cell = &mut matrix[[row, term]];
            if *cell != 0 {
                return Err(CorpusError::format(
                    doc.line,
                    FormatErrorKind::DuplicateTerm(term),
                ));
            }
            *cell = count;
        }
    }

    Ok(matrix)
}

/// Decode LDA-C text straight into a CSR matrix
///
/// Same shape and error rules as [`from_ldac_with`], without allocating the
/// dense grid.
pub fn from_ldac_sparse<R: BufRead>(reader: R, config: &LdacConfig) -> Result<SparseMatrix> {
    let docs = parse_documents(reader, config)?;
    let n_terms = vocabulary_size(&docs);
    debug!(n_docs = docs.len(), n_terms, "decoded LDA-C shape");

    let mut triplets = TriMat::new((docs.len(), n_terms));
    let mut seen: HashMap<usize, u64> = HashMap::new();
    for (row, doc) in docs.iter().enumerate() {
        seen.clear();
        for &(term, count) in &doc.pairs {
            let cell = seen.entry(term).or_insert(0);
            if *cell != 0 {
                return Err(CorpusError::format(
                    doc.line,
                    FormatErrorKind::DuplicateTerm(term),
                ));
            }
            *cell = count;
        }
        for (&term, &count) in &seen {
            if count > 0 {
                triplets.add_triplet(row, term, count);
            }
        }
    }

    Ok(triplets.to_csr())
}

// Term ids are below usize::MAX (checked in parse_pair), so `+ 1` fits
fn vocabulary_size(docs: &[ParsedDoc]) -> usize {
    docs.iter()
        .flat_map(|doc| doc.pairs.iter().map(|&(term, _)| term))
        .max()
        .map_or(0, |max_term| max_term + 1)
}

fn parse_documents<R: BufRead>(reader: R, config: &LdacConfig) -> Result<Vec<ParsedDoc>> {
    let mut docs = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;
        let pairs = parse_line(&line, config.validate_term_count)
            .map_err(|kind| CorpusError::format(line_no, kind))?;
        docs.push(ParsedDoc {
            line: line_no,
            pairs,
        });
    }
    Ok(docs)
}

fn parse_line(line: &str, validate_count: bool) -> ParseResult<Vec<(usize, u64)>> {
    let mut tokens = line.split_whitespace();
    // Unique-term count; the line is non-blank so it always exists
    let declared = tokens.next().unwrap_or_default();

    let pairs = tokens.map(parse_pair).collect::<ParseResult<Vec<_>>>()?;

    if validate_count {
        let declared: usize = parse_int(declared)?;
        if declared != pairs.len() {
            return Err(FormatErrorKind::TermCountMismatch {
                declared,
                found: pairs.len(),
            });
        }
    }

    Ok(pairs)
}

fn parse_pair(token: &str) -> ParseResult<(usize, u64)> {
    let (term, count) = token
        .split_once(':')
        .filter(|(_, count)| !count.contains(':'))
        .ok_or_else(|| FormatErrorKind::MalformedPair(token.to_string()))?;
    let term: usize = parse_int(term)?;
    if term == usize::MAX {
        return Err(FormatErrorKind::TermIdOutOfRange(term));
    }
    Ok((term, parse_int(count)?))
}

fn parse_int<T: std::str::FromStr>(text: &str) -> ParseResult<T> {
    text.parse()
        .map_err(|_| FormatErrorKind::InvalidInteger(text.to_string()))
}
