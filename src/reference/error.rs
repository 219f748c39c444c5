// ABOUTME: Error types for loading the agent reference lists
// ABOUTME: Covers reading a configured lists file and parsing its YAML

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReferenceError>;
