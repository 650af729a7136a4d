//! FILENAME: core/persistence/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Row {row}, column \"{column}\": {detail}")]
    InvalidCell {
        row: u32,
        column: &'static str,
        detail: String,
    },
}
