// ABOUTME: Error types for agent sessions
// ABOUTME: Wraps render and log failures plus missing selections at register time

use thiserror::Error;

use crate::record::RecordError;
use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Template error: {0}")]
    TemplateError(#[from] TemplateError),

    #[error("Record error: {0}")]
    RecordError(#[from] RecordError),

    #[error("No {what} selected")]
    MissingSelection { what: &'static str },
}

pub type Result<T> = std::result::Result<T, SessionError>;
