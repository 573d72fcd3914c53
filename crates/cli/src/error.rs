//! Typed failures that map onto lapctl exit codes.

use thiserror::Error;

/// Errors the command layer raises deliberately; `main` maps each variant
/// onto a stable process exit code for scripting.
#[derive(Error, Debug)]
pub enum CliError {
    /// An input path named on the command line does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The request is well-formed but semantically unusable.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The configuration file could not be loaded or failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Filesystem trouble while reading or writing an artifact.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A JSON artifact on disk did not parse.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
