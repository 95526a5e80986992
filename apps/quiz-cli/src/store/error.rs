//! Snapshot file error types.

use quiz_core::QuizError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to replace {target} with {temp}: {source}")]
    AtomicWriteFailed {
        temp: PathBuf,
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot in {path}: {reason}")]
    InvalidSnapshot { path: PathBuf, reason: String },
}

impl From<StoreError> for QuizError {
    fn from(e: StoreError) -> Self {
        QuizError::persistence(e)
    }
}
