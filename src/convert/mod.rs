//! Conversions between count matrices and token streams
//!
//! Sampler-style training loops (collapsed Gibbs sampling for LDA) walk the
//! corpus token by token, so they want two parallel index arrays rather
//! than a matrix.

pub mod tokens;

pub use tokens::{matrix_to_stream, matrix_to_stream_checked, stream_to_matrix, TokenStream};
