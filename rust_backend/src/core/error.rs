//! Error types for the classification pipeline.

use std::path::PathBuf;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error type for pipeline operations
///
/// `NotFound` and `Schema` abort a whole run. `LookupMiss` is local to a
/// single satellite query.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Satellite not found: {0}")]
    LookupMiss(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] polars::prelude::PolarsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Whether this error must stop the whole run.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PipelineError::LookupMiss(_))
    }
}
