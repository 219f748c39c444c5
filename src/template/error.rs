// ABOUTME: Error types for template catalog loading and rendering
// ABOUTME: Unknown keys are the only render failure; the rest come from catalog loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Unknown template '{key}' for sector {sector}")]
    InvalidTemplateKey { key: String, sector: String },

    #[error("Duplicate template key: {key}")]
    DuplicateKey { key: String },

    #[error("Invalid category '{key}': {reason}")]
    InvalidCategory { key: String, reason: String },

    #[error("Catalog is for sector {found}, expected {expected}")]
    SectorMismatch { expected: String, found: String },

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
