// ABOUTME: Error types for the interaction log
// ABOUTME: Covers file access, CSV encoding and timezone configuration failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Unknown timezone: {name}")]
    InvalidTimezone { name: String },

    #[error("Encoding error: {message}")]
    EncodingError { message: String },
}

pub type Result<T> = std::result::Result<T, RecordError>;
