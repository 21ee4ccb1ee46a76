//! LDA-C bag-of-words text format
//!
//! One line per document:
//!
//! ```text
//! <unique_terms> <term>:<count> <term>:<count> ...
//! ```
//!
//! Only non-zero counts are listed, so a document with no tokens has no
//! representation and is rejected on encode.

pub mod decode;
pub mod encode;

pub use decode::{from_ldac, from_ldac_sparse, from_ldac_str, from_ldac_with};
pub use encode::{to_ldac, to_ldac_with, write_ldac, DocLines};

/// Options for LDA-C encoding and decoding
#[derive(Debug, Clone)]
pub struct LdacConfig {
    /// Log encoding progress every this many documents (0 disables)
    pub progress_every: usize,
    /// Check each line's leading unique-term count against its pairs
    pub validate_term_count: bool,
}

impl Default for LdacConfig {
    fn default() -> Self {
        Self {
            progress_every: 1000,
            validate_term_count: false,
        }
    }
}

impl LdacConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the progress logging interval
    pub fn progress_every(mut self, rows: usize) -> Self {
        self.progress_every = rows;
        self
    }

    /// Enable or disable unique-term count validation on decode
    pub fn validate_term_count(mut self, validate: bool) -> Self {
        self.validate_term_count = validate;
        self
    }
}
