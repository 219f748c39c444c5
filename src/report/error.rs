// ABOUTME: Error types for dashboard reports, exports and backup imports
// ABOUTME: Wraps log access and serialization failures and rejects bad filters

use thiserror::Error;

use crate::record::RecordError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Record error: {0}")]
    RecordError(#[from] RecordError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid date '{value}', expected dd/mm/YYYY or YYYY-mm-dd")]
    InvalidDate { value: String },

    #[error("Start date {from} is after end date {to}")]
    InvalidRange { from: String, to: String },

    #[error("Log already holds {rows} rows; refusing to import without force")]
    LogNotEmpty { rows: usize },
}

pub type Result<T> = std::result::Result<T, ReportError>;
