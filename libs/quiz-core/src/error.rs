//! Error types for quiz-core.

use crate::import::ImportFormat;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using QuizError.
pub type Result<T> = std::result::Result<T, QuizError>;

/// Errors surfaced by imports, library operations and snapshot stores.
///
/// Navigation and selection edge cases are never errors; those are
/// silent no-ops on [`crate::Session`].
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("import is missing required fields: {}", .missing.join(", "))]
    Schema { missing: Vec<&'static str> },

    #[error("import contains no questions")]
    EmptyImport,

    #[error("failed to parse {format} import: {message}")]
    Parse {
        format: ImportFormat,
        message: String,
    },

    #[error("unsupported import format: {extension:?}")]
    Format { extension: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no library loaded")]
    NoLibrary,

    #[error("session storage error: {message}")]
    Persistence { message: String },
}

impl QuizError {
    pub(crate) fn parse(format: ImportFormat, message: impl ToString) -> Self {
        Self::Parse {
            format,
            message: message.to_string(),
        }
    }

    /// Wrap any displayable failure from a snapshot store.
    pub fn persistence(message: impl ToString) -> Self {
        Self::Persistence {
            message: message.to_string(),
        }
    }

    /// Whether the caller should treat this as a warning rather than a failure.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NoLibrary | Self::Persistence { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_fields() {
        let error = QuizError::Schema {
            missing: vec!["stem", "answer"],
        };
        assert_eq!(
            error.to_string(),
            "import is missing required fields: stem, answer"
        );
    }

    #[test]
    fn parse_error_names_format() {
        let error = QuizError::parse(ImportFormat::Document, "expected an array");
        assert_eq!(
            error.to_string(),
            "failed to parse document import: expected an array"
        );
    }

    #[test]
    fn warnings_are_classified() {
        assert!(QuizError::NoLibrary.is_warning());
        assert!(QuizError::persistence("disk full").is_warning());
        assert!(!QuizError::EmptyImport.is_warning());
    }
}
