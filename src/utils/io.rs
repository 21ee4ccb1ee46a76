//! I/O Utilities
//!
//! Dense count matrices as header-less CSV, one document per row.

use crate::error::Result;
use crate::matrix::DenseMatrix;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Read a dense count matrix from CSV
///
/// Every row must have the same number of fields.
pub fn read_dense_csv<R: Read>(reader: R) -> Result<DenseMatrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut data = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = 0;

    for record in reader.deserialize::<Vec<u64>>() {
        let row = record?;
        n_cols = row.len();
        data.extend(row);
        n_rows += 1;
    }

    Ok(DenseMatrix::from_shape_vec((n_rows, n_cols), data)?)
}

/// Write a dense count matrix as CSV
pub fn write_dense_csv<W: Write>(matrix: &DenseMatrix, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    for row in matrix.rows() {
        writer.write_record(row.iter().map(|count| count.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

/// Load a dense count matrix from a CSV file
pub fn load_dense_csv<P: AsRef<Path>>(path: P) -> Result<DenseMatrix> {
    read_dense_csv(File::open(path)?)
}

/// Save a dense count matrix to a CSV file
pub fn save_dense_csv<P: AsRef<Path>>(matrix: &DenseMatrix, path: P) -> Result<()> {
    write_dense_csv(matrix, File::create(path)?)
}
